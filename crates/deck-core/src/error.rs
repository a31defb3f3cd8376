use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{tool} failed: {message}")]
    Tool { tool: String, message: String },

    #[error("{tool} is required but was not found on PATH. {hint}")]
    ToolMissing { tool: String, hint: String },

    #[error("Unexpected checkbox pattern {pattern:?} in answer group {group}")]
    AnswerPattern { pattern: String, group: usize },

    #[error("Answer key ends with an incomplete checkbox group {pattern:?}")]
    IncompleteAnswerGroup { pattern: String },

    #[error("Question parser fault at line {line}: {message}")]
    ParserState { line: usize, message: String },

    #[error("Question text ends inside question {number} ({state})")]
    TruncatedQuestion { number: u32, state: String },

    #[error("Found {questions} questions but {answers} answer-key entries")]
    CountMismatch { questions: usize, answers: usize },

    #[error("Image appendix lists {identifiers} figures but {images} images survived filtering")]
    ImageCountMismatch { identifiers: usize, images: usize },

    #[error("Question {question} references Abbildung {image}, which is not in the image catalog")]
    MissingImage { question: String, image: u32 },

    #[error("Image processing error: {0}")]
    Image(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Pipeline error: {0}")]
    Pipeline(String),
}

pub type Result<T> = std::result::Result<T, DeckError>;
