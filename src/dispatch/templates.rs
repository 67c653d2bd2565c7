//! Response texts.  The chat renderer understands `##` / `###` headers,
//! `**bold**` and `•` bullets, so every template sticks to that subset.

use crate::dispatch::Category;

/// Shown wherever a location is interpolated but none is known yet.
pub const UNKNOWN_LOCATION: &str = "your area";

/// A category's response: fixed text, or text built from the user's
/// location.
#[derive(Clone, Copy)]
pub enum Template {
    Static(&'static str),
    Parameterized(fn(&str) -> String),
}

impl Template {
    pub fn render(&self, location: &str) -> String {
        match self {
            Self::Static(text) => (*text).to_string(),
            Self::Parameterized(build) => build(display_location(location)),
        }
    }
}

/// Template bound to each routable category.  `Unmatched` has none – its
/// fallback quotes the utterance instead (see [`unmatched`]).
pub fn template_for(category: Category) -> Option<Template> {
    let template = match category {
        Category::Greeting => Template::Parameterized(greeting),
        Category::Typhoon => Template::Static(TYPHOON),
        Category::Earthquake => Template::Static(EARTHQUAKE),
        Category::Flood => Template::Static(FLOOD),
        Category::Fire => Template::Static(FIRE),
        Category::Medical => Template::Static(MEDICAL),
        Category::Preparedness => Template::Static(PREPAREDNESS),
        Category::Unmatched => return None,
    };
    Some(template)
}

fn display_location(location: &str) -> &str {
    let trimmed = location.trim();
    if trimmed.is_empty() {
        UNKNOWN_LOCATION
    } else {
        trimmed
    }
}

// ───────────────────────────── Greeting ──────────────────────────────────

fn greeting(location: &str) -> String {
    format!(
        "## 👋 Hello! I'm your Emergency Response Assistant\n\
         \n\
         📍 **Current location:** {location}\n\
         \n\
         I work even without internet and can guide you through:\n\
         \n\
         ### 🆘 What I can help with\n\
         • 🌀 **Typhoons & storms** – before, during and after\n\
         • 🌍 **Earthquakes** – drop, cover and hold on\n\
         • 🌊 **Floods** – evacuation and water safety\n\
         • 🔥 **Fires** – escaping safely and smoke protection\n\
         • 🏥 **Medical emergencies** – basic first aid\n\
         • 🎒 **Preparedness** – go bags and emergency kits\n\
         \n\
         Tell me what is happening (for example \"earthquake\", \"flood\" or \"chest pain\") \
         and I'll tell you what to do.\n\
         \n\
         **In immediate danger? Call 911 now.**"
    )
}

// ───────────────────────────── Disasters ─────────────────────────────────

const TYPHOON: &str = "\
## 🌀 Typhoon Safety Guide

### ⚠️ Before the typhoon
• Monitor PAGASA bulletins and typhoon signal levels
• Secure loose objects outside your home
• Charge phones and power banks
• Prepare your go bag with food, water and medicine
• Know your barangay's evacuation center

### 🏠 During the typhoon
• **Stay indoors** and away from windows
• Turn off the main power switch if flooding starts
• Evacuate immediately when authorities say so
• Do not cross flooded roads or rivers

### ✅ After the typhoon
• Wait for the official all-clear before going out
• Stay away from fallen power lines
• Boil drinking water until supply is declared safe

📞 **NDRRMC:** 911 · **Red Cross:** 143

**Stay calm and stay informed. Help is on the way.**";

const EARTHQUAKE: &str = "\
## 🌍 Earthquake Safety Guide

### 🫣 During the shaking
• **DROP** to your hands and knees
• **COVER** your head and neck under a sturdy table
• **HOLD ON** until the shaking stops
• Stay away from windows, shelves and hanging objects
• If outdoors, move to an open area away from buildings and wires

### ✅ After the shaking
• Expect aftershocks – drop, cover and hold on again
• Check yourself and others for injuries
• Leave damaged buildings using the stairs, never elevators
• If you are near the coast, move to higher ground (tsunami risk)
• Check for gas leaks and do not light matches

📞 **NDRRMC:** 911 · **PHIVOLCS:** (02) 8426-1468

**You can get through this. Stay calm and help those around you.**";

const FLOOD: &str = "\
## 🌊 Flood Safety Guide

### 🚨 Immediate actions
• **Move to higher ground now** – do not wait
• Turn off electricity at the main switch
• Never walk or drive through moving water
• Just 15 cm of moving water can knock you down

### 🏠 If you are trapped
• Go to the highest floor or the roof
• Signal for help with a flashlight or bright cloth
• Call 911 and share your exact location

### ✅ After the flood
• Avoid floodwater – it may be contaminated or electrified
• Watch for leptospirosis symptoms (fever, muscle pain)
• Clean and disinfect everything the water touched

📞 **NDRRMC:** 911 · **Red Cross:** 143

**Stay safe and stay high. Rescuers are looking for people like you.**";

const FIRE: &str = "\
## 🔥 Fire Safety Guide

### 🚨 Get out now
• Alert everyone and **leave immediately**
• Stay low under the smoke and cover your nose and mouth
• Feel doors before opening – if hot, use another way out
• Never use elevators
• Once out, **stay out** – never go back inside

### 🧍 If your clothes catch fire
• **STOP, DROP and ROLL**
• Cool burns with clean running water for 20 minutes

### 📞 Call for help
• **Bureau of Fire Protection:** 911 or 160
• Tell them your exact address and if anyone is trapped

**Your life matters more than belongings. Get out and stay safe.**";

const MEDICAL: &str = "\
## 🏥 Medical Emergency Guide

### 🚨 First steps
• **Call 911** or the nearest hospital immediately
• Check that the area is safe before helping
• Check if the person is responsive and breathing

### 💓 Heart attack or chest pain
• Keep the person seated and calm
• Loosen tight clothing
• If unconscious and not breathing, start CPR: 100–120 chest compressions per minute

### 🩸 Severe bleeding
• Apply firm, direct pressure with a clean cloth
• Keep pressing – do not lift to check
• Raise the injured part above the heart if possible

### 🧠 Stroke signs (BE FAST)
• **B**alance, **E**yes, **F**ace drooping, **A**rm weakness, **S**peech, **T**ime to call 911

📞 **Emergency:** 911 · **Red Cross:** 143

**Stay with the person until help arrives. You are doing the right thing.**";

const PREPAREDNESS: &str = "\
## 🎒 Emergency Preparedness Guide

### 🧰 Go bag essentials
• Drinking water – 4 liters per person per day, for 3 days
• Ready-to-eat food and a can opener
• Flashlight, radio and extra batteries
• First aid kit and maintenance medicines
• Copies of IDs and important documents in a waterproof pouch
• Cash, whistle, phone charger and power bank
• Extra clothes, blanket and hygiene items

### 👨‍👩‍👧 Family plan
• Agree on a meeting place and an out-of-town contact
• Know the nearest evacuation center
• Practice earthquake and fire drills

**Being prepared today saves lives tomorrow.**";

// ───────────────────────── Fallback variants ─────────────────────────────

/// Fallback for an utterance no category matched.  Quotes the text exactly
/// as typed.
pub fn unmatched(utterance: &str) -> String {
    format!(
        "## 🤔 I didn't quite understand\n\
         \n\
         You said: \"{utterance}\"\n\
         \n\
         I'm trained to help with emergencies. Try asking about:\n\
         \n\
         ### 💡 Topics I know\n\
         • 🌀 Typhoons or storms\n\
         • 🌍 Earthquakes\n\
         • 🌊 Floods\n\
         • 🔥 Fires\n\
         • 🏥 Medical emergencies or first aid\n\
         • 🎒 Emergency kits and preparation\n\
         \n\
         **If this is a life-threatening emergency, call 911 immediately.**"
    )
}

/// Explicit refusal for an off-topic request.
pub fn decline(utterance: &str) -> String {
    format!(
        "## 🚫 Outside my scope\n\
         \n\
         I'm sorry, but I can't help with \"{utterance}\".\n\
         \n\
         I'm an emergency response assistant, so I only cover disaster safety and first aid.\n\
         \n\
         ### 🆘 Ask me about\n\
         • 🌀 Typhoons, 🌍 earthquakes, 🌊 floods or 🔥 fires\n\
         • 🏥 Medical emergencies and first aid\n\
         • 🎒 Preparing your emergency kit\n\
         \n\
         **Stay safe, and reach out whenever you need emergency guidance.**"
    )
}

/// Re-prompt for an utterance that is in scope but not recognized as a
/// specific emergency.
pub fn redirect(utterance: &str, location: &str) -> String {
    let location = display_location(location);
    format!(
        "## ⚠️ Not recognized as an emergency\n\
         \n\
         I didn't recognize \"{utterance}\" as an emergency situation.\n\
         \n\
         ### 📍 Here's what I can do for {location}\n\
         • 🌀 Typhoon and storm safety steps\n\
         • 🌍 Earthquake response\n\
         • 🌊 Flood evacuation guidance\n\
         • 🔥 Fire escape instructions\n\
         • 🏥 First aid for medical emergencies\n\
         • 🎒 Go bag and preparedness checklists\n\
         \n\
         Describe what is happening around you and I'll guide you.\n\
         \n\
         **If anyone is in danger right now, call 911.**"
    )
}
