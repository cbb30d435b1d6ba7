//! 基于 proj4rs 的坐标转换

use super::forward::Forward;
use super::{AngularUnit, GeogCs, SpatialRef};
use crate::error::OziResult;
use proj4rs::proj::Proj;
use proj4rs::transform::transform;

/// 从某个地理坐标系到目标空间参考系的坐标转换
///
/// 输入始终为经纬度(度);目标为地理坐标系时输出为其角度单位,否则为米。
/// proj4rs 未实现的投影先由 proj4rs 完成基准面转换,再在目标椭球体上正算。
/// 两端基准面定义完全相同时不调用 proj4rs。
#[derive(Clone, Debug)]
pub struct CoordTransform {
    source: Proj,
    target: Proj,
    forward: Option<Forward>,
    target_is_geographic: bool,
    angular_unit: AngularUnit,
    same_datum: bool,
}

impl CoordTransform {
    /// 创建转换
    ///
    /// # 错误
    /// proj4rs 无法识别任一端的定义或投影参数退化时返回 [`crate::OziError::Geodesy`]
    pub fn new(source: &GeogCs, target: &SpatialRef) -> OziResult<Self> {
        let forward = match target {
            SpatialRef::Projected { geog, projection } => {
                Forward::new(projection, &geog.ellipsoid)?
            }
            SpatialRef::Geographic(_) => None,
        };

        let source_def = source.to_proj_string();
        let target_def = match forward {
            Some(_) => target.geog().to_proj_string(),
            None => target.to_proj_string(),
        };

        let source_proj = Proj::from_proj_string(&source_def)?;
        let target_proj = Proj::from_proj_string(&target_def)?;

        Ok(Self {
            source: source_proj,
            target: target_proj,
            forward,
            target_is_geographic: !target.is_projected(),
            angular_unit: target.geog().angular_unit,
            same_datum: source_def == target_def,
        })
    }

    /// 目标是否为地理坐标系
    pub fn target_is_geographic(&self) -> bool {
        self.target_is_geographic
    }

    /// 转换一个点
    ///
    /// # 参数
    /// * `lon` - 经度(度)
    /// * `lat` - 纬度(度)
    pub fn apply(&self, lon: f64, lat: f64) -> OziResult<(f64, f64)> {
        let (lon, lat) = if self.same_datum {
            (lon, lat)
        } else {
            // proj4rs 的经纬度以弧度表示
            let mut point = (lon.to_radians(), lat.to_radians(), 0.0);
            transform(&self.source, &self.target, &mut point)?;
            if self.target_is_geographic || self.forward.is_some() {
                (point.0.to_degrees(), point.1.to_degrees())
            } else {
                return Ok((point.0, point.1));
            }
        };

        match &self.forward {
            Some(forward) => forward.project(lon, lat),
            None => Ok((
                self.angular_unit.from_degrees(lon),
                self.angular_unit.from_degrees(lat),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::ProjectionSpec;
    use crate::srs::{Ellipsoid, HelmertShift};

    #[test]
    fn identical_definitions_pass_through() {
        let wgs84 = GeogCs::wgs84();
        let t = CoordTransform::new(&wgs84, &SpatialRef::Geographic(wgs84.clone())).unwrap();
        assert!(t.target_is_geographic());
        assert_eq!(t.apply(37.25, 55.5).unwrap(), (37.25, 55.5));
    }

    #[test]
    fn projects_onto_transverse_mercator() {
        let wgs84 = GeogCs::wgs84();
        let target = SpatialRef::Projected {
            geog: wgs84.clone(),
            projection: ProjectionSpec::TransverseMercator {
                latitude_of_origin: 0.0,
                central_meridian: 39.0,
                scale_factor: 1.0,
                false_easting: 500000.0,
                false_northing: 0.0,
            },
        };
        let t = CoordTransform::new(&wgs84, &target).unwrap();
        assert!(!t.target_is_geographic());

        // 中央子午线上的点只有北向坐标
        let (x, y) = t.apply(39.0, 0.0).unwrap();
        assert!((x - 500000.0).abs() < 1e-6);
        assert!(y.abs() < 1e-6);

        let (x, y) = t.apply(40.0, 55.0).unwrap();
        assert!(x > 500000.0);
        assert!(y > 6_000_000.0 && y < 6_200_000.0);
    }

    #[test]
    fn projections_missing_from_proj4rs_are_computed() {
        let wgs84 = GeogCs::wgs84();
        let specs = [
            ProjectionSpec::Sinusoidal {
                central_meridian: 20.0,
            },
            ProjectionSpec::EquidistantConic {
                standard_parallel_1: 5.0,
                standard_parallel_2: 15.0,
                latitude_of_center: 10.0,
                longitude_of_center: 20.0,
            },
            ProjectionSpec::Polyconic {
                central_meridian: 20.0,
            },
            ProjectionSpec::VanDerGrinten {
                central_meridian: 20.0,
            },
            ProjectionSpec::Bonne {
                standard_parallel_1: 10.0,
                central_meridian: 20.0,
            },
        ];
        for projection in specs {
            let target = SpatialRef::Projected {
                geog: wgs84.clone(),
                projection,
            };
            let t = CoordTransform::new(&wgs84, &target).unwrap();
            assert!(!t.target_is_geographic());
            let (x, _) = t.apply(20.0, 12.0).unwrap();
            assert!(x.abs() < 1e-6, "{projection:?}: {x}");
            let (x, _) = t.apply(21.0, 12.0).unwrap();
            assert!(x > 90_000.0 && x < 120_000.0, "{projection:?}: {x}");
        }
    }

    #[test]
    fn computed_projection_applies_datum_shift_first() {
        let source = GeogCs {
            name: "Adindan".into(),
            datum: "Adindan".into(),
            ellipsoid: Ellipsoid::Clarke1880,
            towgs84: Some(HelmertShift::ThreeParam([-162.0, -12.0, 206.0])),
            prime_meridian: 0.0,
            angular_unit: AngularUnit::Degree,
            epsg: None,
        };
        let target = SpatialRef::Projected {
            geog: GeogCs::wgs84(),
            projection: ProjectionSpec::Sinusoidal {
                central_meridian: 30.0,
            },
        };
        let (x, y) = CoordTransform::new(&source, &target)
            .unwrap()
            .apply(30.0, 15.0)
            .unwrap();
        // 平移只有一两百米
        assert!(x.abs() > 1.0 && x.abs() < 500.0, "{x}");
        assert!(y > 1_600_000.0 && y < 1_700_000.0, "{y}");
    }

    #[test]
    fn grad_target_scales_output() {
        let wgs84 = GeogCs::wgs84();
        let mut target = wgs84.clone();
        target.angular_unit = AngularUnit::Grad;
        let t = CoordTransform::new(&wgs84, &SpatialRef::Geographic(target)).unwrap();
        let (lon, lat) = t.apply(9.0, 45.0).unwrap();
        assert!((lon - 10.0).abs() < 1e-9, "{lon}");
        assert!((lat - 50.0).abs() < 1e-9, "{lat}");
    }
}
