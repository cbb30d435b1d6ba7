//! proj4 地理坐标系定义字符串的解析
//!
//! 仅用于把 EPSG 数据库中的地理坐标系定义还原为 [`GeogCs`] 的组成部分,
//! 不是通用的 proj 字符串解析器。

use super::ellipsoid::{prime_meridian, Ellipsoid, HelmertShift};
use crate::error::{OziError, OziResult};

/// 从 proj4 字符串中提取的地理坐标系参数
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeographicParams {
    pub ellipsoid: Ellipsoid,
    pub towgs84: Option<HelmertShift>,
    pub prime_meridian: f64,
}

/// proj 内置基准面关键字: (名称, 椭球体, 到 WGS84 的转换)
///
/// 基于格网改正的基准面(如 NAD27)没有等价的 Helmert 参数。
static PROJ_DATUMS: [(&str, Ellipsoid, Option<HelmertShift>); 10] = [
    ("WGS84", Ellipsoid::Wgs84, Some(HelmertShift::NONE)),
    (
        "GGRS87",
        Ellipsoid::Grs80,
        Some(HelmertShift::ThreeParam([-199.87, 74.79, 246.62])),
    ),
    ("NAD83", Ellipsoid::Grs80, Some(HelmertShift::NONE)),
    ("NAD27", Ellipsoid::Clarke1866, None),
    (
        "potsdam",
        Ellipsoid::Bessel1841,
        Some(HelmertShift::SevenParam([
            598.1, 73.7, 418.2, 0.202, 0.045, -2.455, 6.7,
        ])),
    ),
    (
        "carthage",
        Ellipsoid::Clarke1880Ign,
        Some(HelmertShift::ThreeParam([-263.0, 6.0, 431.0])),
    ),
    (
        "hermannskogel",
        Ellipsoid::Bessel1841,
        Some(HelmertShift::SevenParam([
            577.326, 90.129, 463.919, 5.137, 1.474, 5.297, 2.4232,
        ])),
    ),
    (
        "ire65",
        Ellipsoid::ModifiedAiry,
        Some(HelmertShift::SevenParam([
            482.530, -130.596, 564.557, -1.042, -0.214, -0.631, 8.15,
        ])),
    ),
    (
        "nzgd49",
        Ellipsoid::International1924,
        Some(HelmertShift::SevenParam([
            59.47, -5.04, 187.44, 0.47, -0.1, 1.024, -4.5993,
        ])),
    ),
    (
        "OSGB36",
        Ellipsoid::Airy1830,
        Some(HelmertShift::SevenParam([
            446.448, -125.157, 542.060, 0.1502, 0.2470, 0.8421, -20.4894,
        ])),
    ),
];

fn param<'a>(params: &[(&'a str, &'a str)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| *v)
}

fn number(params: &[(&str, &str)], key: &str) -> OziResult<Option<f64>> {
    param(params, key)
        .map(|v| {
            v.parse::<f64>()
                .map_err(|_| OziError::Geodesy(format!("bad +{key}={v}")))
        })
        .transpose()
}

/// 解析地理坐标系的 proj4 定义
///
/// 显式给出的 `+towgs84` 优先于 `+datum` 关键字自带的转换参数。
pub fn parse_geographic(definition: &str) -> OziResult<GeographicParams> {
    let params: Vec<(&str, &str)> = definition
        .split_whitespace()
        .map(|token| token.trim_start_matches('+'))
        .map(|token| token.split_once('=').unwrap_or((token, "")))
        .collect();

    match param(&params, "proj") {
        Some("longlat") | Some("latlong") | Some("lonlat") | Some("latlon") => {}
        other => {
            return Err(OziError::Geodesy(format!(
                "not a geographic definition (+proj={})",
                other.unwrap_or("")
            )))
        }
    }

    let mut ellipsoid = None;
    let mut towgs84 = None;

    if let Some(datum) = param(&params, "datum") {
        let (_, e, shift) = PROJ_DATUMS
            .iter()
            .find(|(name, ..)| name.eq_ignore_ascii_case(datum))
            .ok_or_else(|| OziError::Geodesy(format!("unknown datum +datum={datum}")))?;
        ellipsoid = Some(*e);
        towgs84 = *shift;
    }

    if let Some(id) = param(&params, "ellps") {
        ellipsoid = Some(
            Ellipsoid::from_proj_id(id)
                .ok_or_else(|| OziError::Geodesy(format!("unknown ellipsoid +ellps={id}")))?,
        );
    }

    if let Some(a) = number(&params, "a")? {
        let b = match (number(&params, "b")?, number(&params, "rf")?) {
            (Some(b), _) => b,
            (None, Some(rf)) if rf != 0.0 => a * (1.0 - 1.0 / rf),
            _ => a,
        };
        ellipsoid = Some(Ellipsoid::Custom { a, b });
    }

    if let Some(values) = param(&params, "towgs84") {
        towgs84 = Some(
            HelmertShift::parse(values)
                .ok_or_else(|| OziError::Geodesy(format!("bad +towgs84={values}")))?,
        );
    }

    let prime_meridian = match param(&params, "pm") {
        Some(pm) => prime_meridian(pm)
            .ok_or_else(|| OziError::Geodesy(format!("unknown prime meridian +pm={pm}")))?,
        None => 0.0,
    };

    let ellipsoid =
        ellipsoid.ok_or_else(|| OziError::Geodesy(format!("no ellipsoid in \"{definition}\"")))?;

    Ok(GeographicParams {
        ellipsoid,
        towgs84,
        prime_meridian,
    })
}
