//! Water saturation line from IAPWS-IF97.
//!
//! The saturation temperature uses the explicit region 4 backward equation.
//! Enthalpies of the saturated phases are delegated to [`seuif97`], forcing
//! region 1 (liquid) and region 2 (vapor) at the saturation temperature.

use seuif97::{OH, pt};

use crate::support::thermo::PropertyError;

/// Critical pressure, MPa.
const P_CRIT_MPA: f64 = 22.064;

/// Triple-point pressure, MPa.
const P_TRIPLE_MPA: f64 = 611.213e-6;

const N: [f64; 10] = [
    0.116_705_214_527_67e4,
    -0.724_213_167_032_06e6,
    -0.170_738_469_400_92e2,
    0.120_208_247_024_70e5,
    -0.323_255_503_223_33e7,
    0.149_151_086_135_30e2,
    -0.482_326_573_615_91e4,
    0.405_113_405_420_57e6,
    -0.238_555_575_678_49,
    0.650_175_348_447_98e3,
];

fn check_domain(p_mpa: f64) -> Result<(), PropertyError> {
    if !(P_TRIPLE_MPA..=P_CRIT_MPA).contains(&p_mpa) {
        return Err(PropertyError::out_of_domain(format!(
            "saturation pressure {p_mpa} MPa outside [{P_TRIPLE_MPA}, {P_CRIT_MPA}] MPa"
        )));
    }
    Ok(())
}

/// Saturation temperature in kelvin for a pressure in MPa.
pub(super) fn saturation_temperature_k(p_mpa: f64) -> Result<f64, PropertyError> {
    check_domain(p_mpa)?;

    let beta = p_mpa.powf(0.25);
    let e = beta * beta + N[2] * beta + N[5];
    let f = N[0] * beta * beta + N[3] * beta + N[6];
    let g = N[1] * beta * beta + N[4] * beta + N[7];
    let d = 2.0 * g / (-f - (f * f - 4.0 * e * g).sqrt());
    let t = 0.5 * (N[9] + d - ((N[9] + d).powi(2) - 4.0 * (N[8] + N[9] * d)).sqrt());

    if t.is_finite() {
        Ok(t)
    } else {
        Err(PropertyError::calculation(format!(
            "saturation temperature undefined at {p_mpa} MPa"
        )))
    }
}

/// Latent heat of vaporization in J/kg for a pressure in MPa.
pub(super) fn latent_heat_j_per_kg(p_mpa: f64) -> Result<f64, PropertyError> {
    let t_c = saturation_temperature_k(p_mpa)? - 273.15;

    let h_liquid = pt(p_mpa, t_c, (OH, 1));
    let h_vapor = pt(p_mpa, t_c, (OH, 2));
    let latent = (h_vapor - h_liquid) * 1000.0;

    if latent.is_finite() && latent > 0.0 {
        Ok(latent)
    } else {
        Err(PropertyError::calculation(format!(
            "latent heat undefined at {p_mpa} MPa"
        )))
    }
}
