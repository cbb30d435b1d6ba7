//! proj4rs 未实现的几种投影的正算
//!
//! 公式采用 Snyder《Map Projections: A Working Manual》中的椭球体形式。
//! Van der Grinten 只有球面形式,以长半轴为球半径。
//! 输入为目标地理坐标系中的经纬度(度),输出为米,假东/假北恒为 0。

use super::Ellipsoid;
use crate::error::{OziError, OziResult};
use crate::projection::ProjectionSpec;
use std::f64::consts::{FRAC_PI_2, PI};

const EPS: f64 = 1e-10;

/// 椭球体的长半轴与第一偏心率平方
#[derive(Clone, Copy, Debug, PartialEq)]
struct Spheroid {
    a: f64,
    e2: f64,
}

impl Spheroid {
    fn new(ellipsoid: &Ellipsoid) -> Self {
        let rf = ellipsoid.inverse_flattening();
        let e2 = if rf == 0.0 {
            0.0
        } else {
            let f = 1.0 / rf;
            f * (2.0 - f)
        };
        Self {
            a: ellipsoid.semi_major(),
            e2,
        }
    }

    fn w(&self, phi: f64) -> f64 {
        (1.0 - self.e2 * phi.sin().powi(2)).sqrt()
    }

    /// 平行圈半径与长半轴之比
    fn m(&self, phi: f64) -> f64 {
        phi.cos() / self.w(phi)
    }

    /// 卯酉圈曲率半径
    fn nu(&self, phi: f64) -> f64 {
        self.a / self.w(phi)
    }

    /// 赤道到纬度 `phi` 的子午线弧长(米)
    fn arc(&self, phi: f64) -> f64 {
        let e2 = self.e2;
        let e4 = e2 * e2;
        let e6 = e4 * e2;
        self.a
            * ((1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0) * phi
                - (3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * phi).sin()
                + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * phi).sin()
                - (35.0 * e6 / 3072.0) * (6.0 * phi).sin())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Method {
    Sinusoidal,
    EquidistantConic { n: f64, g: f64, rho0: f64 },
    Polyconic { arc0: f64 },
    VanDerGrinten,
    Bonne { top: f64, arc1: f64 },
}

/// 一个已确定参数的投影正算
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Forward {
    spheroid: Spheroid,
    lon0: f64,
    method: Method,
}

impl Forward {
    /// 为 proj4rs 不支持的投影构造正算,其余投影返回 `Ok(None)`
    ///
    /// # 错误
    /// 圆锥常数为 0 等退化参数返回 [`OziError::Geodesy`]
    pub(crate) fn new(spec: &ProjectionSpec, ellipsoid: &Ellipsoid) -> OziResult<Option<Self>> {
        let spheroid = Spheroid::new(ellipsoid);
        let (lon0, method) = match *spec {
            ProjectionSpec::Sinusoidal { central_meridian } => {
                (central_meridian, Method::Sinusoidal)
            }
            ProjectionSpec::EquidistantConic {
                standard_parallel_1,
                standard_parallel_2,
                latitude_of_center,
                longitude_of_center,
            } => {
                let phi1 = standard_parallel_1.to_radians();
                let phi2 = standard_parallel_2.to_radians();
                let (m1, arc1) = (spheroid.m(phi1), spheroid.arc(phi1));
                let n = if (phi1 - phi2).abs() < EPS {
                    phi1.sin()
                } else {
                    spheroid.a * (m1 - spheroid.m(phi2)) / (spheroid.arc(phi2) - arc1)
                };
                if n.abs() < EPS || !n.is_finite() {
                    return Err(OziError::Geodesy(format!(
                        "degenerate equidistant conic: standard parallels {standard_parallel_1}, {standard_parallel_2}"
                    )));
                }
                let g = spheroid.a * m1 / n + arc1;
                let rho0 = g - spheroid.arc(latitude_of_center.to_radians());
                (longitude_of_center, Method::EquidistantConic { n, g, rho0 })
            }
            // 原点纬度固定为 0
            ProjectionSpec::Polyconic { central_meridian } => {
                (central_meridian, Method::Polyconic { arc0: 0.0 })
            }
            ProjectionSpec::VanDerGrinten { central_meridian } => {
                (central_meridian, Method::VanDerGrinten)
            }
            ProjectionSpec::Bonne {
                standard_parallel_1,
                central_meridian,
            } => {
                let phi1 = standard_parallel_1.to_radians();
                // 标准纬线在赤道时退化为正弦投影
                if phi1.abs() < EPS {
                    (central_meridian, Method::Sinusoidal)
                } else {
                    let top = spheroid.a * spheroid.m(phi1) / phi1.sin();
                    let arc1 = spheroid.arc(phi1);
                    (central_meridian, Method::Bonne { top, arc1 })
                }
            }
            _ => return Ok(None),
        };
        Ok(Some(Self {
            spheroid,
            lon0,
            method,
        }))
    }

    /// 经纬度(度)投影为平面坐标(米)
    pub(crate) fn project(&self, lon: f64, lat: f64) -> OziResult<(f64, f64)> {
        let sp = &self.spheroid;
        let phi = lat.to_radians();
        let dl = adjust_lon((lon - self.lon0).to_radians());

        let (x, y) = match self.method {
            Method::Sinusoidal => (sp.a * dl * sp.m(phi), sp.arc(phi)),
            Method::EquidistantConic { n, g, rho0 } => {
                let rho = g - sp.arc(phi);
                let theta = n * dl;
                (rho * theta.sin(), rho0 - rho * theta.cos())
            }
            Method::Polyconic { arc0 } => {
                if phi.abs() < EPS {
                    (sp.a * dl, -arc0)
                } else {
                    let e = dl * phi.sin();
                    let ncot = sp.nu(phi) / phi.tan();
                    (ncot * e.sin(), sp.arc(phi) - arc0 + ncot * (1.0 - e.cos()))
                }
            }
            Method::VanDerGrinten => van_der_grinten(sp.a, dl, phi),
            Method::Bonne { top, arc1 } => {
                let rho = top + arc1 - sp.arc(phi);
                // 极点投影为一个点
                if rho.abs() < EPS || (phi.abs() - FRAC_PI_2).abs() < EPS {
                    (0.0, top - rho)
                } else {
                    let e = sp.a * sp.m(phi) * dl / rho;
                    (rho * e.sin(), top - rho * e.cos())
                }
            }
        };

        if x.is_finite() && y.is_finite() {
            Ok((x, y))
        } else {
            Err(OziError::Geodesy(format!(
                "point ({lon}, {lat}) cannot be projected"
            )))
        }
    }
}

/// 经差规整到 [-π, π]
fn adjust_lon(dl: f64) -> f64 {
    if dl.abs() <= PI {
        dl
    } else {
        dl - 2.0 * PI * ((dl + PI) / (2.0 * PI)).floor()
    }
}

fn van_der_grinten(r: f64, dl: f64, phi: f64) -> (f64, f64) {
    if phi.abs() < EPS {
        return (r * dl, 0.0);
    }
    let theta = (2.0 * phi / PI).abs().min(1.0).asin();
    if dl.abs() < EPS || (phi.abs() - FRAC_PI_2).abs() < EPS {
        return (0.0, PI * r * phi.signum() * (theta / 2.0).tan());
    }

    let a = 0.5 * (PI / dl - dl / PI).abs();
    let a2 = a * a;
    let (sin_t, cos_t) = theta.sin_cos();
    let g = cos_t / (sin_t + cos_t - 1.0);
    let p = g * (2.0 / sin_t - 1.0);
    let p2 = p * p;
    let q = a2 + g;
    let d = p2 + a2;

    let x = (a * (g - p2) + (a2 * (g - p2).powi(2) - d * (g * g - p2)).max(0.0).sqrt()) / d;
    let y = (p * q - a * ((a2 + 1.0) * d - q * q).max(0.0).sqrt()) / d;
    (PI * r * dl.signum() * x, PI * r * phi.signum() * y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forward(spec: ProjectionSpec) -> Forward {
        Forward::new(&spec, &Ellipsoid::Wgs84).unwrap().unwrap()
    }

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn supported_projections_are_left_to_proj4rs() {
        let lcc = ProjectionSpec::LambertConformalConic {
            standard_parallel_1: 5.0,
            standard_parallel_2: 15.0,
            latitude_of_origin: 10.0,
            central_meridian: 20.0,
        };
        assert_eq!(Forward::new(&lcc, &Ellipsoid::Wgs84).unwrap(), None);
        assert_eq!(
            Forward::new(&ProjectionSpec::Mercator, &Ellipsoid::Wgs84).unwrap(),
            None
        );
    }

    #[test]
    fn sinusoidal_matches_reference_values() {
        let f = forward(ProjectionSpec::Sinusoidal {
            central_meridian: 20.0,
        });
        assert_eq!(f.project(20.0, 0.0).unwrap(), (0.0, 0.0));
        // 赤道上 1 度经差
        let (x, y) = f.project(21.0, 0.0).unwrap();
        assert!(close(x, 111319.4907932736, 1e-6), "{x}");
        assert!(close(y, 0.0, 1e-9));
        // 子午线弧长: 赤道到 45 度
        let (x, y) = f.project(20.0, 45.0).unwrap();
        assert!(close(x, 0.0, 1e-9));
        assert!(close(y, 4984944.4, 1.0), "{y}");
    }

    #[test]
    fn equidistant_conic_keeps_meridian_distances() {
        let f = forward(ProjectionSpec::EquidistantConic {
            standard_parallel_1: 5.0,
            standard_parallel_2: 15.0,
            latitude_of_center: 10.0,
            longitude_of_center: 20.0,
        });
        let sp = Spheroid::new(&Ellipsoid::Wgs84);
        assert_eq!(f.project(20.0, 10.0).unwrap(), (0.0, 0.0));
        let (x, y) = f.project(20.0, 12.0).unwrap();
        assert!(close(x, 0.0, 1e-9));
        let expected = sp.arc(12f64.to_radians()) - sp.arc(10f64.to_radians());
        assert!(close(y, expected, 1e-6), "{y} {expected}");

        // 标准纬线上长度不变形
        let (x, _) = f.project(20.001, 5.0).unwrap();
        let along = sp.a * sp.m(5f64.to_radians()) * 0.001f64.to_radians();
        assert!(close(x, along, 1e-3), "{x} {along}");
    }

    #[test]
    fn equidistant_conic_rejects_symmetric_parallels() {
        let spec = ProjectionSpec::EquidistantConic {
            standard_parallel_1: 0.0,
            standard_parallel_2: 0.0,
            latitude_of_center: 0.0,
            longitude_of_center: 0.0,
        };
        assert!(matches!(
            Forward::new(&spec, &Ellipsoid::Wgs84),
            Err(OziError::Geodesy(_))
        ));
    }

    #[test]
    fn polyconic_axes() {
        let f = forward(ProjectionSpec::Polyconic {
            central_meridian: 20.0,
        });
        let sp = Spheroid::new(&Ellipsoid::Wgs84);
        let (x, y) = f.project(22.0, 0.0).unwrap();
        assert!(close(x, sp.a * 2f64.to_radians(), 1e-6));
        assert_eq!(y, 0.0);
        let (x, y) = f.project(20.0, 30.0).unwrap();
        assert!(close(x, 0.0, 1e-9));
        assert!(close(y, sp.arc(30f64.to_radians()), 1e-6));
        // 东西对称
        let (xe, ye) = f.project(25.0, 40.0).unwrap();
        let (xw, yw) = f.project(15.0, 40.0).unwrap();
        assert!(close(xe, -xw, 1e-6) && close(ye, yw, 1e-6));
    }

    #[test]
    fn van_der_grinten_special_lines() {
        let f = forward(ProjectionSpec::VanDerGrinten {
            central_meridian: 0.0,
        });
        let r = Ellipsoid::Wgs84.semi_major();
        let (x, y) = f.project(90.0, 0.0).unwrap();
        assert!(close(x, r * FRAC_PI_2, 1e-6));
        assert_eq!(y, 0.0);
        // 中央子午线: y = πR·tan(θ/2), sinθ = 2φ/π
        let (x, y) = f.project(0.0, 45.0).unwrap();
        assert_eq!(x, 0.0);
        assert!(close(y, PI * r * (15f64.to_radians()).tan(), 1e-6));
        // 一般点落在外接圆内并保持象限
        let (x, y) = f.project(-60.0, -30.0).unwrap();
        assert!(x < 0.0 && y < 0.0);
        assert!(x.hypot(y) < PI * r);
    }

    #[test]
    fn bonne_is_true_along_central_meridian() {
        let f = forward(ProjectionSpec::Bonne {
            standard_parallel_1: 10.0,
            central_meridian: 20.0,
        });
        let sp = Spheroid::new(&Ellipsoid::Wgs84);
        let (x, y) = f.project(20.0, 10.0).unwrap();
        assert!(close(x, 0.0, 1e-9) && close(y, 0.0, 1e-6));
        let (x, y) = f.project(20.0, 14.0).unwrap();
        assert!(close(x, 0.0, 1e-9));
        let expected = sp.arc(14f64.to_radians()) - sp.arc(10f64.to_radians());
        assert!(close(y, expected, 1e-6));

        // 赤道标准纬线退化为正弦投影
        let bonne = forward(ProjectionSpec::Bonne {
            standard_parallel_1: 0.0,
            central_meridian: 20.0,
        });
        let sinu = forward(ProjectionSpec::Sinusoidal {
            central_meridian: 20.0,
        });
        assert_eq!(bonne.project(23.0, 41.0).unwrap(), sinu.project(23.0, 41.0).unwrap());
    }

    #[test]
    fn longitude_difference_wraps() {
        assert!(close(adjust_lon(270f64.to_radians()), -FRAC_PI_2, 1e-12));
        assert!(close(adjust_lon(-270f64.to_radians()), FRAC_PI_2, 1e-12));
        assert_eq!(adjust_lon(1.0), 1.0);
    }
}
