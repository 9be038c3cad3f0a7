use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("WebDriver error: {0}")]
    WebDriver(#[from] thirtyfour::error::WebDriverError),

    #[error("renderer unavailable: {0}")]
    RendererUnavailable(String),

    #[error("not logged in to the board site; manual login required")]
    AuthenticationRequired,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
