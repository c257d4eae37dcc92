mod chart;
mod layout;
mod summary;
mod table;

pub use chart::MonthlyHistoryChart;
pub use layout::PageLayout;
pub use summary::AccountsSummary;
pub use table::AccountsTable;
