use crate::status::{StatusError, StatusTable};
use crate::units::{percent_of, Unit};

/// Nominal output power rating of the UPS.
pub const NOMPOWER: &str = "NOMPOWER";
/// Current load as a percentage of the nominal power.
pub const LOADPCT: &str = "LOADPCT";

/// Current UPS load in watts. No rounding happens here.
pub fn calc_load_watts(status: &StatusTable) -> Result<f64, StatusError> {
    let nominal_power = status.get_float(NOMPOWER, Unit::Watts)?;
    let load_percent = status.get_float(LOADPCT, Unit::Percent)?;
    log::debug!("{NOMPOWER}={nominal_power} {LOADPCT}={load_percent}");
    Ok(percent_of(nominal_power, load_percent))
}
