use admin_panel_client::session::Prompt;
use std::sync::Mutex;

/// Prompt that answers with a fixed choice and records the questions.
#[derive(Debug)]
pub struct MockPrompt {
    pub answer: bool,
    pub questions: Mutex<Vec<String>>,
}

impl MockPrompt {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            questions: Mutex::new(Vec::new()),
        }
    }

    pub fn get_questions(&self) -> Vec<String> {
        self.questions.lock().unwrap().clone()
    }
}

impl Prompt for MockPrompt {
    fn confirm(&self, question: &str) -> bool {
        self.questions.lock().unwrap().push(question.to_string());
        self.answer
    }
}
