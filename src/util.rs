use crate::network::Point;
use float_cmp::{approx_eq, F64Margin};
use num::complex::Complex64;

/// Line by line comparison of two texts, e.g. rendered Touchstone documents
pub fn comp_line(exemplar: &str, calc: &str, test: &str) {
    let mut exemplar_iter = exemplar.lines();
    let mut calc_iter = calc.lines();
    let mut i: usize = 0;
    loop {
        i += 1;
        match (exemplar_iter.next(), calc_iter.next()) {
            (None, None) => break,
            (Some(e), Some(c)) => assert!(
                e == c,
                "test {} line {} does not match\n  exemplar: {}\n      calc: {}",
                test,
                i,
                e,
                c
            ),
            _ => panic!("test {} number of lines does not match at {}", test, i),
        }
    }
}

pub fn comp_point_c64(exemplar: &Point, calc: &Point, precision: F64Margin, test: &str) {
    assert_eq!(exemplar.dim(), calc.dim(), "test {} dimensions differ", test);
    for ((j, k), c) in calc.indexed_iter() {
        comp_c64(&exemplar[(j, k)], c, precision, test, &format!("({},{})", j, k));
    }
}

pub fn comp_c64(
    exemplar: &Complex64,
    calc: &Complex64,
    precision: F64Margin,
    test: &str,
    idx: &str,
) {
    comp_f64(
        &(exemplar.re),
        &(calc.re),
        precision,
        test,
        &(idx.to_owned() + ".re"),
    );
    comp_f64(
        &(exemplar.im),
        &(calc.im),
        precision,
        test,
        &(idx.to_owned() + ".im"),
    );
}

pub fn comp_f64(exemplar: &f64, calc: &f64, precision: F64Margin, test: &str, idx: &str) {
    assert!(
        approx_eq!(f64, *calc, *exemplar, precision),
        " Failed test {} at location {}\n  exemplar: {}\n      calc: {}",
        test,
        idx,
        exemplar,
        calc
    );
}

#[cfg(test)]
mod test {
    use super::*;
    use ndarray::prelude::*;
    use num::complex::c64;

    #[test]
    fn equal_texts_pass() {
        comp_line("a\nb\n", "a\nb", "texts");
    }

    #[test]
    #[should_panic]
    fn different_line_counts_fail() {
        comp_line("a\nb", "a", "texts");
    }

    #[test]
    #[should_panic]
    fn distant_points_fail() {
        let a = array![[c64(1.0, 0.0)]];
        let b = array![[c64(1.0, 1e-3)]];
        comp_point_c64(&a, &b, F64Margin::default(), "points");
    }
}
