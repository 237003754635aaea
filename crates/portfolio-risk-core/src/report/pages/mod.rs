mod plot;
mod table;
mod title;

pub use plot::{ActivePerformancePlot, PerformancePlot};
pub use table::PerformanceTable;
pub use title::TitlePage;
