pub mod daily_bar;
pub mod request;
pub mod series;
