pub mod chart_data;
pub mod daily_results;
pub mod dto;
pub mod live_results;
pub mod lucky_number;
pub mod markets;
pub mod number_data;
pub mod routes;
pub mod settings;
