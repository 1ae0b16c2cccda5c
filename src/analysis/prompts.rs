/*!
 * Prompt template for scene analysis.
 */

/// Structured-extraction prompt sent once per scene.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// The template string with a `{transcript}` placeholder
    template: String,
}

impl PromptTemplate {
    /// Asks for the four scene fields as JSON. The three-reference cap lives
    /// only here; parsed results are not truncated.
    pub const SCENE_ANALYSIS: &'static str = "Given the transcript below, extract the following in valid JSON:\n\
- summary: one-sentence summary\n\
- characters: list of characters mentioned\n\
- mood: overall mood or emotion\n\
- cultural_references: up to 3 references (e.g., famous works, genres, pop culture, tropes, or historical context)\n\
\n\
Transcript:\n\
{transcript}\n";

    /// Create a new prompt template.
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
        }
    }

    /// Create the default scene analysis template.
    pub fn scene_analysis() -> Self {
        Self::new(Self::SCENE_ANALYSIS)
    }

    /// Render the template, embedding the transcript verbatim.
    pub fn render(&self, transcript: &str) -> String {
        self.template.replacen("{transcript}", transcript, 1)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::scene_analysis()
    }
}
