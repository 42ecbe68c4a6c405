//! Role configuration for the pipeline stages.
//!
//! A role is an immutable persona descriptor: who the model is, what it is
//! trying to do, and what shape its output should take. Two fixed roles
//! exist, one per stage. Roles are plain data; the stages interpolate them
//! into completion requests.

/// An immutable persona descriptor for one stage.
#[derive(Debug, Clone)]
pub struct RoleConfig {
    /// Role name, e.g. "Game Master".
    pub name: &'static str,

    /// What the role is trying to accomplish each turn.
    pub goal: &'static str,

    /// Persona and style text.
    pub backstory: &'static str,

    /// The shape the output should take. Advisory only: enforced through
    /// prompt wording, never by code.
    pub expected_output: &'static str,
}

impl RoleConfig {
    /// The narrator role: advances the plot in 1-3 sentences of second
    /// person present tense with a dry, sarcastic tone.
    pub fn narrator() -> Self {
        Self {
            name: "Game Master",
            goal: "Write what happens next in a player's adventure game. \
                   You must only write 1-3 sentences in response. \
                   Always write in second person present tense.",
            backstory: "You are a cynical, witty game master who has seen it all. \
                        You like to tease the player and narrate events with a dry, \
                        sarcastic humor.",
            expected_output: "A narrative response in 1-3 sentences written in second \
                              person present tense. Ex. (You look north and see...)",
        }
    }

    /// The summarizer role: compresses the full story into a brief running
    /// summary. "Brief" is a soft contract carried by the prompt; callers
    /// must not assume a hard length bound.
    pub fn summarizer() -> Self {
        Self {
            name: "Narrative Summarizer",
            goal: "Distill a full game log into a concise summary of key events.",
            backstory: "You are a seasoned historian of interactive narratives, \
                        skilled at sifting through long logs of text to identify \
                        and articulate the most pivotal moments and recent \
                        developments.",
            expected_output: "A concise summary of the game's current state and \
                              most recent development.",
        }
    }

    /// Build the system prompt sent alongside a stage's completion request.
    pub fn system_prompt(&self) -> String {
        let mut prompt = String::new();
        prompt.push_str("You are ");
        prompt.push_str(self.name);
        prompt.push_str(". ");
        prompt.push_str(self.backstory);
        prompt.push_str("\n\nYour goal: ");
        prompt.push_str(self.goal);
        prompt
    }
}
