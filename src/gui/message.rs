#[derive(Debug, Clone)]
pub enum Message {
    /// Open the file dialog and run the pipeline on the picked image
    OpenImage,
}
