use crate::consts::MIN_MAGNITUDE;
use crate::error::ConvertError;
use num::complex::Complex64;
use std::f64::consts::PI;

/// 20·log10|c|, floored so that an exact zero stays finite
pub fn to_db(c: Complex64) -> f64 {
    20.0 * c.norm().max(MIN_MAGNITUDE).log10()
}

pub fn to_deg(c: Complex64) -> f64 {
    c.arg().to_degrees()
}

pub fn from_db(db: f64, deg: f64) -> Complex64 {
    Complex64::from_polar(10f64.powf(db / 20.0), deg.to_radians())
}

/// Removes 2π jumps between consecutive phase values (radians)
pub fn unwrap_phase(phi: &[f64]) -> Vec<f64> {
    let mut out: Vec<f64> = Vec::with_capacity(phi.len());
    let mut offset = 0.0;
    for (i, &p) in phi.iter().enumerate() {
        if i > 0 {
            let diff = p - phi[i - 1];
            if diff > PI {
                offset -= 2.0 * PI * ((diff + PI) / (2.0 * PI)).floor();
            } else if diff < -PI {
                offset += 2.0 * PI * ((-diff + PI) / (2.0 * PI)).floor();
            }
        }
        out.push(p + offset);
    }
    out
}

/// Cubic spline with not-a-knot end conditions.
///
/// Outside the sample range the end segments are extended, which is what the
/// DC extrapolation relies on.
#[derive(Clone, Debug)]
pub struct CubicSpline {
    x: Vec<f64>,
    y: Vec<f64>,
    m: Vec<f64>,
}

impl CubicSpline {
    pub fn new(x: &[f64], y: &[f64]) -> Result<CubicSpline, ConvertError> {
        let n = x.len();
        if n != y.len() {
            return Err(ConvertError::Numeric(format!(
                "spline abscissa has {} values, ordinate {}",
                n,
                y.len()
            )));
        }
        if n < 4 {
            return Err(ConvertError::Numeric(format!(
                "cubic spline needs at least 4 points, got {}",
                n
            )));
        }
        let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
        if h.iter().any(|&hi| hi <= 0.0 || !hi.is_finite()) {
            return Err(ConvertError::Numeric(
                "spline abscissa must be strictly increasing".to_string(),
            ));
        }

        // Interior equations for the second derivatives m[1..n-1]:
        //   h[i-1] m[i-1] + 2 (h[i-1] + h[i]) m[i] + h[i] m[i+1] = d[i]
        // Not-a-knot eliminates m[0] and m[n-1] from the first and last rows.
        let k = n - 2;
        let mut sub = vec![0.0; k];
        let mut diag = vec![0.0; k];
        let mut sup = vec![0.0; k];
        let mut rhs = vec![0.0; k];
        for r in 0..k {
            let i = r + 1;
            sub[r] = h[i - 1];
            diag[r] = 2.0 * (h[i - 1] + h[i]);
            sup[r] = h[i];
            rhs[r] = 6.0 * ((y[i + 1] - y[i]) / h[i] - (y[i] - y[i - 1]) / h[i - 1]);
        }

        // m0 = ((h0 + h1) m1 - h0 m2) / h1
        let (h0, h1) = (h[0], h[1]);
        diag[0] += h0 * (h0 + h1) / h1;
        sup[0] -= h0 * h0 / h1;
        // m[n-1] = ((hb + ha) m[n-2] - hb m[n-3]) / ha, ha = h[n-3], hb = h[n-2]
        let (ha, hb) = (h[n - 3], h[n - 2]);
        diag[k - 1] += hb * (ha + hb) / ha;
        sub[k - 1] -= hb * hb / ha;

        let inner = solve_tridiagonal(&sub, &diag, &sup, &rhs)?;

        let mut m = Vec::with_capacity(n);
        m.push(((h0 + h1) * inner[0] - h0 * inner[1]) / h1);
        m.extend_from_slice(&inner);
        m.push(((ha + hb) * inner[k - 1] - hb * inner[k - 2]) / ha);

        Ok(CubicSpline {
            x: x.to_vec(),
            y: y.to_vec(),
            m,
        })
    }

    pub fn eval(&self, xv: f64) -> f64 {
        let n = self.x.len();
        let seg = match self.x.iter().position(|&xi| xi > xv) {
            Some(0) => 0,
            Some(p) => p - 1,
            None => n - 2,
        };
        let (x0, x1) = (self.x[seg], self.x[seg + 1]);
        let (y0, y1) = (self.y[seg], self.y[seg + 1]);
        let (m0, m1) = (self.m[seg], self.m[seg + 1]);
        let h = x1 - x0;
        let a = x1 - xv;
        let b = xv - x0;
        m0 * a.powi(3) / (6.0 * h)
            + m1 * b.powi(3) / (6.0 * h)
            + (y0 / h - m0 * h / 6.0) * a
            + (y1 / h - m1 * h / 6.0) * b
    }
}

/// Thomas algorithm. `sub[0]` and `sup[n-1]` are ignored.
fn solve_tridiagonal(
    sub: &[f64],
    diag: &[f64],
    sup: &[f64],
    rhs: &[f64],
) -> Result<Vec<f64>, ConvertError> {
    let n = diag.len();
    let mut c = vec![0.0; n];
    let mut d = vec![0.0; n];
    for i in 0..n {
        let denom = if i == 0 {
            diag[0]
        } else {
            diag[i] - sub[i] * c[i - 1]
        };
        if denom == 0.0 || !denom.is_finite() {
            return Err(ConvertError::Numeric(
                "singular spline system".to_string(),
            ));
        }
        c[i] = if i + 1 < n { sup[i] / denom } else { 0.0 };
        d[i] = if i == 0 {
            rhs[0] / denom
        } else {
            (rhs[i] - sub[i] * d[i - 1]) / denom
        };
    }
    let mut out = vec![0.0; n];
    out[n - 1] = d[n - 1];
    for i in (0..n - 1).rev() {
        out[i] = d[i] - c[i] * out[i + 1];
    }
    Ok(out)
}
