//! Scripted replies for each stage

use super::Stage;

const GREETING: &[&str] = &[
    "**Namaste! 🙏** I am Pandit Pradeep Kiradoo, your Vedic astrology guide. Please tell me about the challenges or problems you're facing, and I'll provide astrological remedies based on planetary influences.",
    "**Welcome!** I am Pandit Pradeep Kiradoo, a Vedic astrologer with 15+ years of experience. How may I help you with your life's challenges today?",
    "**Jai Shree Ram! 🙏** I am Pandit Pradeep Kiradoo. Please share your concerns, and I'll guide you with Vedic wisdom and planetary remedies.",
];

// Index 0 of every question stage is the primary wording.

const QUESTION_1: &[&str] = &[
    "I appreciate you sharing your concern with me. **Could you tell me how long you've been experiencing this situation?** Understanding the timeline - whether it's recent or long-term - will help me provide better guidance.",
    "Thank you for sharing your concern. **How long have you been facing this issue?** Please tell me the duration - whether it's been days, weeks, months, or years.",
    "I understand you're going through difficulties. **When did this problem first start affecting you?** Knowing the timeline will help me provide better astrological guidance.",
    "Thank you for opening up. **How long has this been going on?** The duration of your challenge is important for understanding the planetary influences.",
];

const QUESTION_2: &[&str] = &[
    "Thank you for sharing that timeline. **In what ways has this been impacting your life?** I'd like to understand how it affects different aspects - your career, relationships, wellbeing, peace of mind, or any other areas you feel are important to mention.",
    "Thank you for that information. **How does this issue affect your daily life?** Does it impact your work, relationships, health, or other areas?",
    "I see. **In what ways does this problem impact your daily routine?** Understanding the effects will help me identify the specific planetary influences.",
    "Thank you. **How does this challenge affect your work, relationships, or health?** This helps me understand the scope of the problem.",
];

const QUESTION_3: &[&str] = &[
    "I see how this has been affecting you. **What steps or remedies have you already explored to address this?** This could include spiritual practices, lifestyle changes, or any other approaches you've tried.",
    "I understand the impact. **What have you already tried to resolve this issue?** Have you attempted any solutions, remedies, or approaches?",
    "Thank you for sharing that. **What solutions have you attempted so far?** Knowing what you've tried helps me suggest different astrological remedies.",
    "I see. **What have you already tried to solve this problem?** This information helps me provide remedies that complement your efforts.",
];

const QUESTION_4: &[&str] = &[
    "Thank you for being open about your experiences. **Could you share how you're feeling emotionally about all of this?** Whether it's bringing up feelings of worry, frustration, hope, or any other emotions - understanding your emotional state will help me suggest appropriate remedies.",
    "Thank you for that information. **How do you feel emotionally about this situation?** Are you feeling stressed, anxious, frustrated, or any other emotions?",
    "I understand. **What emotions do you experience because of this challenge?** Your emotional state is important for understanding the planetary influences.",
    "Thank you. **How do you feel about this situation emotionally?** Are you feeling overwhelmed, hopeful, or any other specific emotions?",
];

const QUESTION_5: &[&str] = &[
    "I appreciate you sharing your emotional journey. **Have you noticed any patterns or recurring signs in your life related to this situation?** These could be physical manifestations, repeated circumstances, or any notable synchronicities that stand out to you.",
    "Thank you for sharing your feelings. **Are there any specific symptoms or manifestations you've noticed?** Any particular patterns or recurring issues?",
    "I understand your emotional state. **Can you describe any specific symptoms or patterns you've observed?** This helps me provide targeted remedies.",
    "Thank you. **What specific symptoms or manifestations have you noticed?** Any particular issues or patterns that stand out?",
];

const ONGOING: &[&str] = &[
    "**Continue with these remedies regularly.** Remember, consistency is key in Vedic practices. Is there anything specific about these remedies you'd like me to explain further?",
    "**These remedies will bring positive changes gradually.** Stay patient and maintain faith. Would you like guidance on any other aspect of your life?",
    "**The remedies I've suggested are based on ancient Vedic wisdom.** Follow them with devotion and you'll see positive results. Do you have any other concerns?",
];

/// Candidate replies for a stage.
///
/// Analysis has no canned candidates; its reply comes from the remedy
/// library.
pub fn candidates(stage: Stage) -> &'static [&'static str] {
    match stage {
        Stage::Greeting => GREETING,
        Stage::Question1 => QUESTION_1,
        Stage::Question2 => QUESTION_2,
        Stage::Question3 => QUESTION_3,
        Stage::Question4 => QUESTION_4,
        Stage::Question5 => QUESTION_5,
        Stage::Analysis => &[],
        Stage::Ongoing => ONGOING,
    }
}
