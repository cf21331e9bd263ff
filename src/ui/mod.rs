pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{dollars, error, header, info, metric, rating_line, section, success, warn};
pub use table::{crosstab_table, dataset_table, group_table, summary_table};
pub use theme::{Theme, theme};
