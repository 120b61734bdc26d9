//! Canned phrasings for each supported language.
//!
//! Templates use `{name}`-style placeholders filled by [`fill`].

use sahayak_core::types::Locale;

/// Every fixed string the assistant can say, for one language.
#[derive(Debug)]
pub struct Phrases {
    pub intro: &'static str,
    pub input_prompt: &'static str,
    pub greetings: &'static [&'static str],
    pub continue_prompts: &'static [&'static str],
    pub state_name: &'static str,
    pub fact_answer: &'static str,
    pub math_answer: &'static str,
    pub unknown_fact: &'static str,
    pub unknown_math: &'static str,
    pub thanks: &'static str,
    pub time_prefixes: &'static [&'static str],
    /// Speak a random continue prompt after telling the time.
    pub prompt_after_time: bool,
    pub playing: &'static str,
    pub play_prompt: &'static str,
    pub searching: &'static str,
    pub search_prompt: &'static str,
    pub looking_up: &'static str,
    pub lookup_prompt: &'static str,
    pub farewell: &'static str,
    pub clarify: &'static str,
    pub not_understood: &'static str,
    pub topic_not_found: &'static str,
    pub topic_ambiguous: &'static str,
    pub service_unavailable: &'static str,
    pub wake_ack: &'static str,
    pub agent_not_found: &'static str,
}

pub static ENGLISH: Phrases = Phrases {
    intro: "I'm an AI, made by {creator}. My name is {name}.",
    input_prompt: "Ask me: ",
    greetings: &[
        "Hello! I'm {name}, how can I help you?",
        "{status} How are you?",
        "Greetings! I'm here to help you.",
    ],
    continue_prompts: &[
        "Ask me anything.",
        "Do you have any questions?",
        "How can I help you?",
        "Ask me more questions",
        "I'm ready to answer your questions, ask me.",
    ],
    state_name: "My name is {name}",
    fact_answer: "{topic} is {answer}",
    math_answer: "{topic} is {answer}",
    unknown_fact: "I don't know that fact. Is there anything else you'd like to know?",
    unknown_math: "I don't know the answer to that math problem.",
    thanks: "You're welcome! Let me know if there is anything else you want to know.",
    time_prefixes: &["Current time is ", "The time is ", "Now it is "],
    prompt_after_time: true,
    playing: "Playing {topic} on YouTube",
    play_prompt: "What would you like me to play?",
    searching: "Searching for {topic}",
    search_prompt: "What would you like me to search for?",
    looking_up: "From Wikipedia, about {topic}:",
    lookup_prompt: "What would you like me to tell you about?",
    farewell: "Goodbye. Have a nice day.",
    clarify: "I don't know that. Please tell me again.",
    not_understood: "Sorry, I didn't understand that.",
    topic_not_found: "Sorry, I couldn't find any information on that topic.",
    topic_ambiguous: "There are multiple results for that. Please be more specific. Options include: {options}",
    service_unavailable: "Sorry, the service is not available right now. Please try again.",
    wake_ack: "Yes, how can I help you?",
    agent_not_found: "Agent not found",
};

pub static BENGALI: Phrases = Phrases {
    intro: "নমস্কার, আমি {name}। আমি আপনার জন্য কী করতে পারি?",
    input_prompt: "আপনি: ",
    greetings: &[
        "হ্যালো! আমি {name}, কিভাবে আপনাকে সাহায্য করতে পারি?",
        "{status} আপনি কিভাবে আছেন?",
        "শুভেচ্ছা! আমি আপনার সহায়তার জন্য এখানে আছি।",
    ],
    continue_prompts: &[
        "আপনি আরও কিছু বলতে চান?",
        "আমি আপনাকে কিভাবে আরও সাহায্য করতে পারি?",
        "আপনার কি অন্য কোন প্রশ্ন আছে?",
    ],
    state_name: "আমার নাম {name}",
    fact_answer: "{topic} হল {answer}",
    math_answer: "{topic} এর উত্তর হল {answer}",
    unknown_fact: "আমি সেই তথ্যটি জানি না। আপনি অন্য কিছু জানতে চান?",
    unknown_math: "আমি সেই গাণিতিক সমস্যাটির সমাধান জানি না।",
    thanks: "আপনাকে ধন্যবাদ! আর কিছু জানার থাকলে আমাকে বলুন।",
    time_prefixes: &["এখন সময় হলো "],
    prompt_after_time: false,
    playing: "{topic} গানটি চালাচ্ছি",
    play_prompt: "কোন গানটি চালাবো?",
    searching: "গুগলে {topic} খুঁজছি",
    search_prompt: "গুগলে কি খুঁজছেন?",
    looking_up: "উইকিপিডিয়া থেকে প্রাপ্ত ফলাফল:",
    lookup_prompt: "উইকিপিডিয়ায় কি খুঁজছেন?",
    farewell: "বিদায়, ভালো থাকবেন।",
    clarify: "আমি নিশ্চিত না যে আপনি কি বলতে চাচ্ছেন। দয়া করে পরিষ্কার করে বলুন।",
    not_understood: "দুঃখিত, আমি বুঝতে পারিনি।",
    topic_not_found: "দুঃখিত, এই বিষয়ে কোনো তথ্য পাওয়া যায়নি।",
    topic_ambiguous: "এই বিষয়ে একাধিক ফলাফল আছে। দয়া করে নির্দিষ্ট করে বলুন। যেমন: {options}",
    service_unavailable: "দুঃখিত, পরিষেবাটি এখন পাওয়া যাচ্ছে না। আবার চেষ্টা করুন।",
    wake_ack: "হ্যাঁ, বলুন কিভাবে সাহায্য করতে পারি?",
    agent_not_found: "এজেন্ট খুঁজে পাওয়া যায়নি",
};

/// Phrasebook for `locale`.
pub fn phrases(locale: Locale) -> &'static Phrases {
    match locale {
        Locale::En => &ENGLISH,
        Locale::Bn => &BENGALI,
    }
}

/// Replace each `{key}` in `template` with its value.
pub fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (key, value) in vars {
        out = out.replace(&format!("{{{}}}", key), value);
    }
    out
}
