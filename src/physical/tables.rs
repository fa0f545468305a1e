//! Built-in threshold tables used when no administered standard resolves.
//!
//! These mirror the rows `fitscore seed` exports. Once operators edit their
//! reference file the two copies can drift; nothing keeps them in sync.

use crate::model::{Gender, StandardGender, TestType};
use crate::standards::{TestStandard, Thresholds};

/// Thresholds for one inclusive age band.
struct AgeBand {
    age_min: u32,
    age_max: u32,
    thresholds: Thresholds,
}

const fn band(age_min: u32, age_max: u32, thresholds: Thresholds) -> AgeBand {
    AgeBand {
        age_min,
        age_max,
        thresholds,
    }
}

/// Standard push-up reps, men.
const PUSH_UP_MALE: &[AgeBand] = &[
    band(0, 29, Thresholds::new(36.0, 29.0, 22.0, 17.0)),
    band(30, 39, Thresholds::new(30.0, 22.0, 17.0, 12.0)),
    band(40, 49, Thresholds::new(25.0, 17.0, 13.0, 10.0)),
    band(50, 59, Thresholds::new(21.0, 13.0, 10.0, 7.0)),
    band(60, 120, Thresholds::new(18.0, 11.0, 8.0, 5.0)),
];

/// Standard push-up reps, women.
const PUSH_UP_FEMALE: &[AgeBand] = &[
    band(0, 29, Thresholds::new(30.0, 21.0, 15.0, 10.0)),
    band(30, 39, Thresholds::new(27.0, 20.0, 13.0, 8.0)),
    band(40, 49, Thresholds::new(24.0, 15.0, 11.0, 5.0)),
    band(50, 59, Thresholds::new(21.0, 11.0, 7.0, 2.0)),
    band(60, 120, Thresholds::new(17.0, 12.0, 5.0, 2.0)),
];

/// Seconds held on one leg with eyes open.
pub const BALANCE_EYES_OPEN: Thresholds = Thresholds::new(30.0, 25.0, 15.0, 5.0);
/// Seconds held on one leg with eyes closed.
pub const BALANCE_EYES_CLOSED: Thresholds = Thresholds::new(20.0, 10.0, 5.0, 2.0);

/// Reach past the toes in cm.
pub const TOE_TOUCH_MALE: Thresholds = Thresholds::new(10.0, 0.0, -10.0, -20.0);
pub const TOE_TOUCH_FEMALE: Thresholds = Thresholds::new(15.0, 5.0, -5.0, -15.0);

/// Negated fist gap in cm: a 10 cm gap is -10.
pub const SHOULDER_MOBILITY: Thresholds = Thresholds::new(-10.0, -20.0, -30.0, -45.0);

/// Seconds carried at 100% bodyweight.
pub const FARMER_CARRY_MALE: Thresholds = Thresholds::new(60.0, 45.0, 30.0, 15.0);
pub const FARMER_CARRY_FEMALE: Thresholds = Thresholds::new(50.0, 35.0, 25.0, 10.0);

/// Harvard step test physical fitness index.
pub const HARVARD_PFI: Thresholds = Thresholds::new(90.0, 80.0, 65.0, 55.0);

fn push_up_bands(gender: Gender) -> &'static [AgeBand] {
    match gender {
        Gender::Male => PUSH_UP_MALE,
        Gender::Female => PUSH_UP_FEMALE,
    }
}

/// Standard-variation push-up thresholds for a client.
pub fn push_up(gender: Gender, age: u32) -> Thresholds {
    let bands = push_up_bands(gender);
    bands
        .iter()
        .find(|b| b.age_min <= age && age <= b.age_max)
        .or_else(|| bands.last())
        .map_or(PUSH_UP_MALE[0].thresholds, |b| b.thresholds)
}

pub fn toe_touch(gender: Gender) -> Thresholds {
    match gender {
        Gender::Male => TOE_TOUCH_MALE,
        Gender::Female => TOE_TOUCH_FEMALE,
    }
}

pub fn farmer_carry(gender: Gender) -> Thresholds {
    match gender {
        Gender::Male => FARMER_CARRY_MALE,
        Gender::Female => FARMER_CARRY_FEMALE,
    }
}

/// The built-in tables expressed as standard rows, for seeding a reference file.
pub fn builtin_standards() -> Vec<TestStandard> {
    let mut rows = Vec::new();
    for (gender, bands) in [
        (StandardGender::Male, PUSH_UP_MALE),
        (StandardGender::Female, PUSH_UP_FEMALE),
    ] {
        for b in bands {
            rows.push(
                TestStandard::new(TestType::PushUp, gender, b.age_min, b.age_max, b.thresholds)
                    .with_variation("standard"),
            );
        }
    }
    rows.push(
        TestStandard::new(TestType::SingleLegBalance, StandardGender::All, 0, 120, BALANCE_EYES_OPEN)
            .with_conditions("eyes_open"),
    );
    rows.push(
        TestStandard::new(TestType::SingleLegBalance, StandardGender::All, 0, 120, BALANCE_EYES_CLOSED)
            .with_conditions("eyes_closed"),
    );
    rows.push(TestStandard::new(TestType::ToeTouch, StandardGender::Male, 0, 120, TOE_TOUCH_MALE));
    rows.push(TestStandard::new(TestType::ToeTouch, StandardGender::Female, 0, 120, TOE_TOUCH_FEMALE));
    rows.push(TestStandard::new(
        TestType::ShoulderMobility,
        StandardGender::All,
        0,
        120,
        SHOULDER_MOBILITY,
    ));
    rows.push(TestStandard::new(TestType::FarmerCarry, StandardGender::Male, 0, 120, FARMER_CARRY_MALE));
    rows.push(TestStandard::new(
        TestType::FarmerCarry,
        StandardGender::Female,
        0,
        120,
        FARMER_CARRY_FEMALE,
    ));
    rows.push(TestStandard::new(TestType::HarvardStepTest, StandardGender::All, 0, 120, HARVARD_PFI));
    for row in &mut rows {
        row.description = Some("built-in default".to_string());
    }
    rows
}
