//! CSV fixtures shared by the unit tests of this crate.

use std::path::Path;

use bikeshare_core::models::TripRecord;
use bikeshare_core::registry::City;
use bikeshare_core::time_utils::parse_timestamp;

pub const CHICAGO_CSV: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
1423854,2017-06-23 15:09:32,2017-06-23 15:14:53,321,Wood St & Hubbard St,Damen Ave & Chicago Ave,Subscriber,Male,1992.0
955915,2017-05-25 18:19:03,2017-05-25 18:45:53,1610,Theater on the Lake,Sheffield Ave & Waveland Ave,Subscriber,Female,1992.0
9031,2017-01-04 08:27:49,2017-01-04 08:34:45,416,May St & Taylor St,Wood St & Taylor St,Subscriber,Male,1981.0
304487,2017-03-06 13:49:38,2017-03-06 13:55:28,350,Christiana Ave & Lawrence Ave,St. Louis Ave & Balmoral Ave,Customer,,
";

pub const NYC_CSV: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
5688089,2017-06-11 14:55:05,2017-06-11 15:08:21,795,Suffolk St & Stanton St,W Broadway & Spring St,Subscriber,Male,1998.0
4096714,2017-05-11 15:30:11,2017-05-11 15:41:43,692,Lexington Ave & E 63 St,1 Ave & E 78 St,Subscriber,Male,1981.0
2173887,2017-03-29 13:26:26,2017-03-29 13:48:31,1325,Broadway & W 60 St,Broadway & W 60 St,,,
";

pub const WASHINGTON_CSV: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type
1621326,2017-06-21 08:36:34,2017-06-21 08:44:43,489.066,14th & Belmont St NW,15th & K St NW,Subscriber
482740,2017-03-11 10:40:00,2017-03-11 10:46:00,402.549,Yuma St & Tenley Circle NW,Connecticut Ave & Yuma St NW,Subscriber
1330037,2017-05-30 01:02:59,2017-05-30 01:13:37,637.251,17th St & Massachusetts Ave NW,5th & K St NW,Subscriber
";

/// Write `content` as `city`'s source file inside `dir`.
pub fn write_city(dir: &Path, city: City, content: &str) {
    std::fs::write(dir.join(city.file_name()), content).expect("write fixture");
}

/// Minimal record starting at `start`, for aggregation tests.
pub fn trip(start: &str, duration: u64, from: &str, to: &str) -> TripRecord {
    let ts = parse_timestamp(start).expect("fixture timestamp");
    TripRecord::new(
        None,
        ts,
        ts,
        duration as f64,
        from.to_string(),
        to.to_string(),
        Some("Subscriber".to_string()),
        None,
        None,
    )
}
