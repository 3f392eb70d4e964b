use chrono::Utc;
use daycount::{date_to_jdn, date_to_mjd, date_to_ordinal_day, jdn_to_date, CivilDateTime};
use qtty::Days;

fn main() -> Result<(), daycount::CalendarError> {
    let now = CivilDateTime::from_utc(Utc::now())?;
    let jd = date_to_jdn(&now)?;
    let rd = date_to_ordinal_day(&now)?;
    let mjd = date_to_mjd(&now)?;

    println!("UTC:  {now}");
    println!("{jd}");
    println!("{rd}");
    println!("{mjd}");
    println!("JD (f64): {}", jd.to_days(Days::new(1e-6))?);
    println!("back: {}", jdn_to_date(jd.combined())?);
    Ok(())
}
