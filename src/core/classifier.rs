//! Status classifier: pure, total mapping from elapsed seconds to a
//! (status, late fee, report-required) tier.

use crate::models::attendance::AttendanceStatus;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Tier {
    pub status: AttendanceStatus,
    pub late_fee: i64,
    pub report_required: bool,
}

const fn tier(status: AttendanceStatus, late_fee: i64, report_required: bool) -> Tier {
    Tier {
        status,
        late_fee,
        report_required,
    }
}

/// Tier bands in ascending order; each entry is the EXCLUSIVE upper
/// bound in seconds for its tier. Anything at or past the last bound
/// falls into the absence tier below.
const BANDS: [(i64, Tier); 5] = [
    (2400, tier(AttendanceStatus::Present, 0, false)), // under 40 min
    (3000, tier(AttendanceStatus::Late, 1000, false)), // 40–50 min
    (3600, tier(AttendanceStatus::Late, 2000, false)), // 50–60 min
    (4200, tier(AttendanceStatus::Late, 3000, false)), // 60–70 min
    (4800, tier(AttendanceStatus::Late, 4000, true)),  // 70–80 min
];

const ABSENT: Tier = tier(AttendanceStatus::UnexcusedAbsence, 5000, true);

/// Classify elapsed seconds since the scheduled start.
///
/// Total over all of i64: negative elapsed (checked in before the start)
/// classifies as present with no fee, with no lower bound on how early.
pub fn classify(elapsed_secs: i64) -> Tier {
    if elapsed_secs < 0 {
        return BANDS[0].1;
    }

    for (upper, t) in BANDS {
        if elapsed_secs < upper {
            return t;
        }
    }

    ABSENT
}
