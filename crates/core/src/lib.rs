//! Core units, constants, and shared primitives for the gravity modulator workspace.

/// Physical constants expressed in SI units (unless stated otherwise).
pub mod constants {
    use std::sync::OnceLock;

    /// Reduced Planck constant (J·s).
    pub const HBAR: f64 = 1.054_571_8e-34;
    /// Speed of light in vacuum (m/s).
    pub const SPEED_OF_LIGHT_M_S: f64 = 299_792_458.0;
    /// Newtonian gravitational constant (m³/kg·s²).
    pub const GRAVITATIONAL_CONSTANT: f64 = 6.674_30e-11;
    /// Surface gravity used by the lift model (m/s²).
    pub const LIFT_GRAVITY_M_S2: f64 = 9.81;

    /// Immutable, process-wide block of the constants the models consume.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct PhysicalConstants {
        pub hbar: f64,
        pub speed_of_light_m_s: f64,
        pub gravitational_constant: f64,
        pub lift_gravity_m_s2: f64,
    }

    /// Shared constants block, initialised on first use and never mutated.
    pub fn physical() -> &'static PhysicalConstants {
        static CONSTANTS: OnceLock<PhysicalConstants> = OnceLock::new();
        CONSTANTS.get_or_init(|| PhysicalConstants {
            hbar: HBAR,
            speed_of_light_m_s: SPEED_OF_LIGHT_M_S,
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            lift_gravity_m_s2: LIFT_GRAVITY_M_S2,
        })
    }
}

/// Basic unit conversion helpers.
pub mod units {
    /// Convert nanometres to metres.
    #[inline]
    pub fn nm_to_m(v: f64) -> f64 {
        v * 1e-9
    }

    /// Convert megawatts to watts.
    #[inline]
    pub fn mw_to_w(v: f64) -> f64 {
        v * 1e6
    }

    /// Convert joules to kilowatt-hours.
    #[inline]
    pub fn j_to_kwh(v: f64) -> f64 {
        v / 3.6e6
    }

    /// Convert degrees to radians.
    #[inline]
    pub fn deg_to_rad(v: f64) -> f64 {
        v.to_radians()
    }
}

/// Minimal vector helpers to avoid ad-hoc `[f64; 3]` math everywhere.
pub mod vector {
    /// Alias for a 3D vector (direction, position, or force depending on context).
    pub type Vector3 = [f64; 3];

    /// Euclidean norm of a vector.
    #[inline]
    pub fn norm(v: &Vector3) -> f64 {
        dot(v, v).sqrt()
    }

    /// Dot product of two vectors.
    #[inline]
    pub fn dot(a: &Vector3, b: &Vector3) -> f64 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    /// Scale a vector by a scalar.
    #[inline]
    pub fn scale(v: &Vector3, s: f64) -> Vector3 {
        [v[0] * s, v[1] * s, v[2] * s]
    }

    /// Unit vector along `v`, or `None` for zero-length or non-finite input.
    pub fn normalize(v: &Vector3) -> Option<Vector3> {
        if v.iter().any(|c| !c.is_finite()) {
            return None;
        }
        let n = norm(v);
        if n > 0.0 && n.is_finite() {
            Some(scale(v, 1.0 / n))
        } else {
            None
        }
    }

}
