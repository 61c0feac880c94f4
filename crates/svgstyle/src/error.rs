pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid SVG document: {0}")]
    Xml(#[from] roxmltree::Error),
}
