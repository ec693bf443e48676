pub const GRAVITY: f64 = 9.80665; // m/s^2
pub const AIR_GAS_CONSTANT: f64 = 287.05287; // J/(kg·K)
pub const HEAT_CAPACITY_RATIO: f64 = 1.4;
pub const ISA_SEA_LEVEL_TEMP: f64 = 288.15; // K
pub const ISA_SEA_LEVEL_PRESSURE: f64 = 101325.0; // Pa
pub const ISA_SEA_LEVEL_DENSITY: f64 = 1.225; // kg/m^3
pub const ISA_LAPSE_RATE: f64 = -0.0065; // K/m

// Geopotential top of the 1976 standard atmosphere (m)
pub const ISA_CEILING: f64 = 84852.0;
pub const ISA_FLOOR: f64 = 0.0;

/// Base altitude (m) and temperature lapse rate (K/m) for each ISA layer.
pub const ISA_LAYERS: [(f64, f64); 7] = [
    (0.0, ISA_LAPSE_RATE),
    (11000.0, 0.0),
    (20000.0, 0.001),
    (32000.0, 0.0028),
    (47000.0, 0.0),
    (51000.0, -0.0028),
    (71000.0, -0.002),
];

pub const DEFAULT_ATMOSPHERE_CACHE_CAPACITY: usize = 1024;

// Below this airspeed the air-data terms are evaluated at the floor value (m/s)
pub const MIN_AIRSPEED: f64 = 1e-3;

// Physical limits used as default trim bounds (degrees)
pub const STALL_ANGLE_OF_ATTACK: f64 = 16.0;
pub const MIN_ANGLE_OF_ATTACK: f64 = -10.0;
pub const MAX_SIDESLIP: f64 = 20.0;
pub const MAX_ELEVATOR_DEFLECTION: f64 = 25.0;
pub const MAX_AILERON_DEFLECTION: f64 = 20.0;
pub const MAX_RUDDER_DEFLECTION: f64 = 30.0;
pub const MAX_PITCH_ATTITUDE: f64 = 30.0;
pub const MAX_BANK_ANGLE: f64 = 80.0;
