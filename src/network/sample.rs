use crate::math::{from_db, to_db, to_deg};
use crate::network::Point;
use ndarray::prelude::*;
use num::complex::Complex64;

/// Magnitude in dB and phase in degrees of one S-parameter
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DbDeg {
    pub db: f64,
    pub deg: f64,
}

impl DbDeg {
    pub fn new(db: f64, deg: f64) -> DbDeg {
        DbDeg { db, deg }
    }

    pub fn from_complex(c: Complex64) -> DbDeg {
        DbDeg {
            db: to_db(c),
            deg: to_deg(c),
        }
    }

    pub fn to_complex(&self) -> Complex64 {
        from_db(self.db, self.deg)
    }

    pub fn mag(&self) -> f64 {
        10f64.powf(self.db / 20.0)
    }
}

/// Dense S-matrix at one frequency, stored as dB/degree pairs
#[derive(Clone, Debug, PartialEq)]
pub struct FrequencySample {
    freq: f64,
    s: Array2<DbDeg>,
}

impl FrequencySample {
    pub fn new(freq: f64, s: Array2<DbDeg>) -> FrequencySample {
        FrequencySample { freq, s }
    }

    pub fn from_point(freq: f64, pt: &Point) -> FrequencySample {
        FrequencySample {
            freq,
            s: pt.map(|&c| DbDeg::from_complex(c)),
        }
    }

    pub fn freq(&self) -> f64 {
        self.freq
    }

    pub fn s(&self) -> &Array2<DbDeg> {
        &self.s
    }

    pub fn at(&self, port: (usize, usize)) -> DbDeg {
        self.s[port]
    }

    pub fn nports(&self) -> usize {
        self.s.nrows()
    }

    pub fn to_point(&self) -> Point {
        self.s.map(|v| v.to_complex())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::util::comp_point_c64;
    use float_cmp::F64Margin;
    use num::complex::c64;

    #[test]
    fn point_round_trip() {
        let pt = array![
            [c64(0.1, -0.2), c64(0.7, 0.05)],
            [c64(0.69, 0.06), c64(-0.3, 0.0)]
        ];
        let sample = FrequencySample::from_point(1.5, &pt);
        assert_eq!(sample.nports(), 2);
        assert_eq!(sample.freq(), 1.5);
        comp_point_c64(
            &pt,
            &sample.to_point(),
            F64Margin {
                epsilon: 1e-12,
                ulps: 4,
            },
            "to_point",
        );
    }

    #[test]
    fn zero_db_is_unit_magnitude() {
        let v = DbDeg::new(0.0, 0.0);
        assert_eq!(v.mag(), 1.0);
        assert_eq!(v.to_complex(), c64(1.0, 0.0));
    }
}
