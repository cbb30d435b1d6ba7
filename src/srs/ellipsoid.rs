//! 椭球体、七参数转换与本初子午线

use std::fmt;

/// 地理参考中使用的参考椭球体
///
/// 具名椭球体与 proj 的 `+ellps=` 标识一一对应,
/// 只给出长短半轴的定义使用 [`Ellipsoid::Custom`]。
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ellipsoid {
    Airy1830,
    AustralianNational,
    Bessel1841,
    BesselNamibia,
    Clarke1866,
    Clarke1880,
    Clarke1880Ign,
    Everest1830,
    Grs80,
    Helmert1906,
    Hough,
    International1924,
    Krassowsky,
    ModifiedAiry,
    ModifiedFischer1960,
    Wgs72,
    Wgs84,
    /// 由长半轴 `a` 和短半轴 `b` 定义
    Custom { a: f64, b: f64 },
}

use Ellipsoid::*;

/// (proj 标识, WKT 名称, 长半轴, 反扁率)
static NAMED: [(Ellipsoid, &str, &str, f64, f64); 17] = [
    (Airy1830, "airy", "Airy 1830", 6377563.396, 299.3249646),
    (AustralianNational, "aust_SA", "Australian National Spheroid", 6378160.0, 298.25),
    (Bessel1841, "bessel", "Bessel 1841", 6377397.155, 299.1528128),
    (BesselNamibia, "bess_nam", "Bessel Namibia (GLM)", 6377483.865280419, 299.1528128),
    (Clarke1866, "clrk66", "Clarke 1866", 6378206.4, 294.978698213898),
    (Clarke1880, "clrk80", "Clarke 1880 mod.", 6378249.145, 293.4663),
    (Clarke1880Ign, "clrk80ign", "Clarke 1880 (IGN)", 6378249.2, 293.466021293627),
    (Everest1830, "evrst30", "Everest 1830 (1937 Adjustment)", 6377276.345, 300.8017),
    (Grs80, "GRS80", "GRS 1980", 6378137.0, 298.257222101),
    (Helmert1906, "helmert", "Helmert 1906", 6378200.0, 298.3),
    (Hough, "hough", "Hough 1960", 6378270.0, 297.0),
    (International1924, "intl", "International 1924", 6378388.0, 297.0),
    (Krassowsky, "krass", "Krassowsky 1940", 6378245.0, 298.3),
    (ModifiedAiry, "mod_airy", "Airy Modified 1849", 6377340.189, 299.3249646),
    (ModifiedFischer1960, "fschr60m", "Modified Fischer 1960", 6378155.0, 298.3),
    (Wgs72, "WGS72", "WGS 72", 6378135.0, 298.26),
    (Wgs84, "WGS84", "WGS 84", 6378137.0, 298.257223563),
];

impl Ellipsoid {
    /// 由 proj 的 `+ellps=` 标识查找具名椭球体
    pub fn from_proj_id(id: &str) -> Option<Self> {
        NAMED
            .iter()
            .find(|(_, proj_id, ..)| proj_id.eq_ignore_ascii_case(id))
            .map(|(e, ..)| *e)
    }

    fn named(&self) -> Option<&'static (Ellipsoid, &'static str, &'static str, f64, f64)> {
        NAMED.iter().find(|(e, ..)| e == self)
    }

    /// proj 标识,自定义椭球体没有标识
    pub fn proj_id(&self) -> Option<&'static str> {
        self.named().map(|(_, id, ..)| *id)
    }

    /// WKT 中 `SPHEROID` 的名称
    pub fn wkt_name(&self) -> &'static str {
        self.named().map(|(_, _, name, ..)| *name).unwrap_or("unnamed")
    }

    /// 长半轴(米)
    pub fn semi_major(&self) -> f64 {
        match self {
            Custom { a, .. } => *a,
            _ => self.named().map(|(_, _, _, a, _)| *a).unwrap_or(f64::NAN),
        }
    }

    /// 反扁率,正球体为 0
    pub fn inverse_flattening(&self) -> f64 {
        match self {
            Custom { a, b } if a == b => 0.0,
            Custom { a, b } => a / (a - b),
            _ => self.named().map(|(.., rf)| *rf).unwrap_or(f64::NAN),
        }
    }

    /// proj 字符串中的椭球体部分
    pub fn to_proj_params(&self) -> String {
        match self {
            Custom { a, b } => format!("+a={a} +b={b}"),
            named => format!("+ellps={}", named.proj_id().unwrap_or("WGS84")),
        }
    }
}

/// Helmert 基准面转换参数(到 WGS84)
///
/// 平移单位为米,旋转单位为角秒,尺度单位为 ppm。
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HelmertShift {
    ThreeParam([f64; 3]),
    SevenParam([f64; 7]),
}

impl HelmertShift {
    /// 零平移
    pub const NONE: HelmertShift = HelmertShift::ThreeParam([0.0; 3]);

    /// 展开为七参数形式
    pub fn to_seven(&self) -> [f64; 7] {
        match self {
            HelmertShift::ThreeParam([dx, dy, dz]) => [*dx, *dy, *dz, 0.0, 0.0, 0.0, 0.0],
            HelmertShift::SevenParam(p) => *p,
        }
    }

    /// 由逗号分隔的 3 或 7 个数值解析
    pub fn parse(text: &str) -> Option<Self> {
        let values: Vec<f64> = text
            .split(',')
            .map(|v| v.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .ok()?;
        match values.len() {
            3 => Some(HelmertShift::ThreeParam([values[0], values[1], values[2]])),
            7 => {
                let mut p = [0.0; 7];
                p.copy_from_slice(&values);
                Some(HelmertShift::SevenParam(p))
            }
            _ => None,
        }
    }
}

impl fmt::Display for HelmertShift {
    /// 逗号分隔的数值,与 proj 的 `+towgs84=` 和 WKT 的 `TOWGS84[]` 相同
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<String> = match self {
            HelmertShift::ThreeParam(p) => p.iter().map(|v| v.to_string()).collect(),
            HelmertShift::SevenParam(p) => p.iter().map(|v| v.to_string()).collect(),
        };
        f.write_str(&values.join(","))
    }
}

/// proj 的具名本初子午线(相对格林尼治的经度,度)
static PRIME_MERIDIANS: [(&str, f64); 13] = [
    ("greenwich", 0.0),
    ("lisbon", -9.131906111111),
    ("paris", 2.337229166667),
    ("bogota", -74.08091666667),
    ("madrid", -3.687938888889),
    ("rome", 12.45233333333),
    ("bern", 7.439583333333),
    ("jakarta", 106.8077194444),
    ("ferro", -17.66666666667),
    ("brussels", 4.367975),
    ("stockholm", 18.05827777778),
    ("athens", 23.7163375),
    ("oslo", 10.72291666667),
];

/// 解析 `+pm=` 的值,可以是名称或度数
pub fn prime_meridian(value: &str) -> Option<f64> {
    PRIME_MERIDIANS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(value))
        .map(|(_, lon)| *lon)
        .or_else(|| value.parse().ok())
}

/// 本初子午线的 WKT 名称
pub fn prime_meridian_name(lon: f64) -> String {
    PRIME_MERIDIANS
        .iter()
        .find(|(_, l)| *l == lon)
        .map(|(name, _)| {
            let mut chars = name.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .unwrap_or_else(|| "unnamed".to_string())
}
