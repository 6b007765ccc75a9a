pub mod forecast_model;
pub mod location;
pub mod parameter;
pub mod time_range;
pub mod weather_frame;
