//! 空间参考系模块
//!
//! 本模块是解析管线与大地测量库之间的接口层,提供:
//!
//! - [`GeogCs`] - 地理坐标系(基准面、椭球体、到 WGS84 的转换、本初子午线)
//! - [`SpatialRef`] - 地理或投影坐标系
//! - [`CoordTransform`] - 基于 proj4rs 的坐标转换,proj4rs 缺少的投影在本地正算
//!
//! EPSG 代码到地理坐标系的映射来自 `crs-definitions`,
//! 与 proj4rs 的 `Proj::from_epsg_code` 使用同一份数据。
//! 坐标系可以导出为 proj 字符串(交给 proj4rs)或 OGC WKT1 文本。

use crate::error::{OziError, OziResult};
use crate::projection::ProjectionSpec;
use std::fmt::Write;

pub mod ellipsoid;
mod forward;
mod proj4;
mod transform;

pub use ellipsoid::{Ellipsoid, HelmertShift};
pub use transform::CoordTransform;

/// WGS84 的 EPSG 代码
pub const EPSG_WGS84: u16 = 4326;

const DEGREE: f64 = 0.0174532925199433;
const GRAD: f64 = 0.01570796326794897;

/// 地理坐标系的角度单位
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AngularUnit {
    #[default]
    Degree,
    /// 百分度,直角为 100
    Grad,
}

impl AngularUnit {
    /// WKT 中 `UNIT` 的名称
    pub fn name(&self) -> &'static str {
        match self {
            AngularUnit::Degree => "degree",
            AngularUnit::Grad => "grad",
        }
    }

    /// 每单位对应的弧度
    pub fn radians(&self) -> f64 {
        match self {
            AngularUnit::Degree => DEGREE,
            AngularUnit::Grad => GRAD,
        }
    }

    /// 把以度表示的角度换算为本单位
    pub fn from_degrees(&self, value: f64) -> f64 {
        match self {
            AngularUnit::Degree => value,
            AngularUnit::Grad => value * 400.0 / 360.0,
        }
    }

    /// 从 WKT 中地理坐标系的第一个角度单位识别,未知单位按度处理
    fn from_wkt(wkt: &str) -> Self {
        let unit = quoted_after(wkt, "ANGLEUNIT[").or_else(|| quoted_after(wkt, ",UNIT["));
        match unit {
            Some(name) if name.eq_ignore_ascii_case("grad") => AngularUnit::Grad,
            _ => AngularUnit::Degree,
        }
    }
}

/// 地理坐标系
#[derive(Clone, Debug, PartialEq)]
pub struct GeogCs {
    /// 坐标系名称
    pub name: String,
    /// WKT 中 `DATUM` 的名称
    pub datum: String,
    pub ellipsoid: Ellipsoid,
    /// 到 WGS84 的 Helmert 转换,`None` 表示未知
    pub towgs84: Option<HelmertShift>,
    /// 本初子午线相对格林尼治的经度(度)
    pub prime_meridian: f64,
    /// 坐标与本初子午线在 WKT 中使用的角度单位
    pub angular_unit: AngularUnit,
    pub epsg: Option<u16>,
}

impl GeogCs {
    /// WGS84 地理坐标系
    pub fn wgs84() -> Self {
        Self {
            name: "WGS 84".to_string(),
            datum: "WGS_1984".to_string(),
            ellipsoid: Ellipsoid::Wgs84,
            towgs84: Some(HelmertShift::NONE),
            prime_meridian: 0.0,
            angular_unit: AngularUnit::Degree,
            epsg: Some(EPSG_WGS84),
        }
    }

    /// 按 EPSG 代码导入标准的地理坐标系定义
    ///
    /// # 错误
    /// 代码未知或不是地理坐标系时返回 [`OziError::Geodesy`]
    pub fn from_epsg(code: u16) -> OziResult<Self> {
        if code == EPSG_WGS84 {
            return Ok(Self::wgs84());
        }
        let def = crs_definitions::from_code(code)
            .ok_or_else(|| OziError::Geodesy(format!("unknown EPSG code {code}")))?;
        let params = proj4::parse_geographic(def.proj4)?;

        let name = quoted_after(def.wkt, "GEOGCS[")
            .or_else(|| quoted_after(def.wkt, "GEOGCRS["))
            .map(str::to_string)
            .unwrap_or_else(|| format!("EPSG:{code}"));
        let datum = quoted_after(def.wkt, "DATUM[")
            .map(str::to_string)
            .unwrap_or_else(|| wkt_identifier(&name));

        Ok(Self {
            name,
            datum,
            ellipsoid: params.ellipsoid,
            towgs84: params.towgs84,
            prime_meridian: params.prime_meridian,
            angular_unit: AngularUnit::from_wkt(def.wkt),
            epsg: Some(code),
        })
    }

    /// proj 字符串中描述基准面的部分(不含 `+proj`)
    fn proj_datum_params(&self) -> String {
        let mut params = self.ellipsoid.to_proj_params();
        if let Some(shift) = &self.towgs84 {
            let _ = write!(params, " +towgs84={shift}");
        }
        if self.prime_meridian != 0.0 {
            let _ = write!(params, " +pm={}", self.prime_meridian);
        }
        params
    }

    /// 导出为 proj4rs 可用的 proj 字符串
    pub fn to_proj_string(&self) -> String {
        format!("+proj=longlat {} +no_defs", self.proj_datum_params())
    }

    fn write_wkt(&self, out: &mut String) {
        let e = &self.ellipsoid;
        let _ = write!(
            out,
            "GEOGCS[\"{}\",DATUM[\"{}\",SPHEROID[\"{}\",{},{}]",
            self.name,
            self.datum,
            e.wkt_name(),
            e.semi_major(),
            e.inverse_flattening()
        );
        if let Some(shift) = &self.towgs84 {
            // WGS84 本身不需要转换参数
            if !(self.ellipsoid == Ellipsoid::Wgs84 && *shift == HelmertShift::NONE) {
                let seven = HelmertShift::SevenParam(shift.to_seven());
                let _ = write!(out, ",TOWGS84[{seven}]");
            }
        }
        let unit = self.angular_unit;
        let _ = write!(
            out,
            "],PRIMEM[\"{}\",{}],UNIT[\"{}\",{}]",
            ellipsoid::prime_meridian_name(self.prime_meridian),
            unit.from_degrees(self.prime_meridian),
            unit.name(),
            unit.radians()
        );
        if let Some(code) = self.epsg {
            let _ = write!(out, ",AUTHORITY[\"EPSG\",\"{code}\"]");
        }
        out.push(']');
    }
}

/// 空间参考系
#[derive(Clone, Debug, PartialEq)]
pub enum SpatialRef {
    /// 地理坐标系,坐标单位由 `angular_unit` 决定
    Geographic(GeogCs),
    /// 投影坐标系,线性单位固定为米
    Projected {
        geog: GeogCs,
        projection: ProjectionSpec,
    },
}

impl SpatialRef {
    /// 所基于的地理坐标系
    pub fn geog(&self) -> &GeogCs {
        match self {
            SpatialRef::Geographic(geog) => geog,
            SpatialRef::Projected { geog, .. } => geog,
        }
    }

    pub fn is_projected(&self) -> bool {
        matches!(self, SpatialRef::Projected { .. })
    }

    /// 投影参数,地理坐标系返回 `None`
    pub fn projection(&self) -> Option<&ProjectionSpec> {
        match self {
            SpatialRef::Geographic(_) => None,
            SpatialRef::Projected { projection, .. } => Some(projection),
        }
    }

    /// 导出为 proj4rs 可用的 proj 字符串
    pub fn to_proj_string(&self) -> String {
        match self {
            SpatialRef::Geographic(geog) => geog.to_proj_string(),
            SpatialRef::Projected { geog, projection } => format!(
                "{} {} +units=m +no_defs",
                projection.to_proj_params(),
                geog.proj_datum_params()
            ),
        }
    }

    /// 导出为 OGC WKT1 文本
    pub fn to_wkt(&self) -> String {
        let mut out = String::new();
        match self {
            SpatialRef::Geographic(geog) => geog.write_wkt(&mut out),
            SpatialRef::Projected { geog, projection } => {
                let _ = write!(out, "PROJCS[\"{} / {}\",", geog.name, projection.name());
                geog.write_wkt(&mut out);
                let _ = write!(out, ",PROJECTION[\"{}\"]", projection.wkt_method());
                for (name, value) in projection.wkt_parameters() {
                    let _ = write!(out, ",PARAMETER[\"{name}\",{value}]");
                }
                out.push_str(",UNIT[\"metre\",1,AUTHORITY[\"EPSG\",\"9001\"]]]");
            }
        }
        out
    }
}

/// 取出 `tag` 之后第一对双引号中的内容
fn quoted_after<'a>(text: &'a str, tag: &str) -> Option<&'a str> {
    let rest = &text[text.find(tag)? + tag.len()..];
    let rest = rest.strip_prefix('"')?;
    rest.find('"').map(|end| &rest[..end])
}

/// 把名称转换为 WKT 标识符风格(非字母数字替换为下划线)
pub(crate) fn wkt_identifier(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wgs84_wkt_is_plain_geographic() {
        let wkt = SpatialRef::Geographic(GeogCs::wgs84()).to_wkt();
        assert_eq!(
            wkt,
            "GEOGCS[\"WGS 84\",DATUM[\"WGS_1984\",SPHEROID[\"WGS 84\",6378137,298.257223563]],\
             PRIMEM[\"Greenwich\",0],UNIT[\"degree\",0.0174532925199433],AUTHORITY[\"EPSG\",\"4326\"]]"
        );
        assert!(!wkt.contains("PROJCS"));
        assert!(!wkt.contains("TOWGS84"));
    }

    #[test]
    fn shifted_datum_carries_towgs84() {
        let geog = GeogCs {
            name: "Adindan".into(),
            datum: "Adindan".into(),
            ellipsoid: Ellipsoid::Clarke1880,
            towgs84: Some(HelmertShift::ThreeParam([-162.0, -12.0, 206.0])),
            prime_meridian: 0.0,
            angular_unit: AngularUnit::Degree,
            epsg: None,
        };
        assert_eq!(
            geog.to_proj_string(),
            "+proj=longlat +ellps=clrk80 +towgs84=-162,-12,206 +no_defs"
        );
        let wkt = SpatialRef::Geographic(geog).to_wkt();
        assert!(wkt.contains("TOWGS84[-162,-12,206,0,0,0,0]"));
        assert!(!wkt.contains("AUTHORITY"));
    }

    #[test]
    fn quoted_names_from_wkt() {
        let wkt = r#"GEOGCS["Pulkovo 1942",DATUM["Pulkovo_1942",SPHEROID["Krassowsky 1940",6378245,298.3]]]"#;
        assert_eq!(quoted_after(wkt, "GEOGCS["), Some("Pulkovo 1942"));
        assert_eq!(quoted_after(wkt, "DATUM["), Some("Pulkovo_1942"));
        assert_eq!(quoted_after(wkt, "PROJCS["), None);
        assert_eq!(wkt_identifier("European 1950 (Mean France)"), "European_1950__Mean_France_");
    }

    #[test]
    fn grad_unit_is_read_and_written() {
        let wkt1 = r#"GEOGCS["NTF (Paris)",DATUM["Nouvelle_Triangulation_Francaise_Paris",SPHEROID["Clarke 1880 (IGN)",6378249.2,293.466021293627]],PRIMEM["Paris",2.5969213],UNIT["grad",0.0157079632679489],AUTHORITY["EPSG","4807"]]"#;
        assert_eq!(AngularUnit::from_wkt(wkt1), AngularUnit::Grad);
        let wkt2 = r#"GEOGCRS["NTF (Paris)",DATUM["x",ELLIPSOID["y",6378249.2,293.466021293627,LENGTHUNIT["metre",1]]],PRIMEM["Paris",2.5969213,ANGLEUNIT["grad",0.0157079632679489]]]"#;
        assert_eq!(AngularUnit::from_wkt(wkt2), AngularUnit::Grad);
        let wgs84 = r#"GEOGCS["WGS 84",DATUM["WGS_1984",SPHEROID["WGS 84",6378137,298.257223563]],PRIMEM["Greenwich",0],UNIT["degree",0.0174532925199433]]"#;
        assert_eq!(AngularUnit::from_wkt(wgs84), AngularUnit::Degree);

        let mut geog = GeogCs::wgs84();
        geog.name = "NTF (Paris)".into();
        geog.prime_meridian = 2.337229166667;
        geog.angular_unit = AngularUnit::Grad;
        geog.epsg = None;
        let wkt = SpatialRef::Geographic(geog).to_wkt();
        assert!(wkt.contains("UNIT[\"grad\",0.01570796326794897]"), "{wkt}");
        assert!(!wkt.contains("\"degree\""));
        // 本初子午线也以百分度表示
        let pm = wkt.split("PRIMEM[\"Paris\",").nth(1).unwrap();
        let pm: f64 = pm[..pm.find(']').unwrap()].parse().unwrap();
        assert!((pm - 2.5969213).abs() < 1e-6, "{pm}");
    }

    #[test]
    fn imports_wgs84_without_lookup() {
        assert_eq!(GeogCs::from_epsg(4326).unwrap(), GeogCs::wgs84());
        assert!(matches!(GeogCs::from_epsg(1), Err(OziError::Geodesy(_))));
    }
}
