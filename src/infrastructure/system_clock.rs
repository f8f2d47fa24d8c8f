// System clock adapter
use chrono::Utc;

use crate::application::clock::Clock;

pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> i64 {
        Utc::now().timestamp()
    }
}
