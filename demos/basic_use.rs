use fmi_opendata::{Fmi, FmiError};
use std::env;

#[tokio::main]
async fn main() -> Result<(), FmiError> {
    configure_polars_display();
    let fmi = Fmi::new();

    // Temperature observations in Helsinki since the beginning of 09/2022,
    // fetched one month at a time.
    let temperatures = fmi
        .observations()
        .place("Helsinki")
        .parameter("temperature")
        .start_date("2022-09-01")
        .call()
        .await?;
    println!("{}", temperatures.frame);

    // Wind speed forecast for Alajärvi, Möksy for the next 24 hours
    let wind_forecast = fmi
        .forecast()
        .fmisid("101533")
        .parameter("wind_speed")
        .hours(24)
        .call()
        .await?;
    println!("{}", wind_forecast.frame);

    Ok(())
}

fn configure_polars_display() {
    // show 20 rows
    env::set_var("POLARS_FMT_MAX_ROWS", "20");
}
