pub mod page_fetcher;
pub mod pipeline;

pub use page_fetcher::{FetchError, PageFetcher};
pub use pipeline::{
    check_bin, discover_and_classify, scrape_url, CheckError, ManualCheck, ScrapeError,
    MAX_CANDIDATES_PER_PAGE,
};
