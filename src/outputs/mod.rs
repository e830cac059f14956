//! Output generation: HTML pages, sitemap, JSON snapshots and the README.
//!
//! # Submodules
//!
//! - [`html`]: Renders highlight and live score records into HTML documents
//! - [`site`]: Writes the index, the per-league pages and the sitemap
//! - [`sitemap`]: Serializes the page list to `sitemap.xml`
//! - [`json`]: Persists fetched records for the README report
//! - [`markdown`]: Renders the README from persisted snapshots
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── index.html
//! ├── england-premier-league.html
//! ├── spain-la-liga.html
//! └── sitemap.xml
//!
//! data_dir/
//! ├── sports_highlights.json
//! └── live_scores.json
//!
//! README.md
//! ```

pub mod html;
pub mod json;
pub mod markdown;
pub mod site;
pub mod sitemap;
