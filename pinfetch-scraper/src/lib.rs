pub mod error;
pub mod loader;
pub mod renderer;
pub mod resolve;
pub mod webdriver;

pub use error::ScrapeError;
pub use loader::ContentLoader;
pub use renderer::PageRenderer;
pub use resolve::UrlResolver;
pub use webdriver::WebDriverRenderer;
