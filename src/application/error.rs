#[derive(Debug)]
pub enum ApplicationError {
    BadRequest(String),
    StorageFailed(String),
    AiProcessingFailed,
}
