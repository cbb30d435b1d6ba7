//! OziExplorer 投影模块
//!
//! 本模块把 `.MAP` 文件中的投影名称和 `Projection Setup` 参数行
//! 转换为结构化的投影定义,并与基准面一起构成完整的空间参考系。
//! 主要包含以下功能:
//!
//! - 按名称前缀识别投影类型
//! - 按位置提取投影参数
//! - 生成源地理坐标系与目标空间参考系
//!
//! 投影的数学计算由 proj4rs 完成,这里只负责参数的组织。

use crate::datum::DatumEntry;
use crate::error::{MissingField, OziError, OziResult};
use crate::map::tokens::{atof, split_fields, starts_with_ignore_case};
use crate::srs::{GeogCs, SpatialRef};
use tracing::*;

/// OziExplorer 支持的投影类型
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProjectionKind {
    /// 经纬度,不做投影
    LatitudeLongitude,
    Mercator,
    TransverseMercator,
    /// 通用横轴墨卡托,带号无法从参数行推出
    Utm,
    LambertConformalConic,
    Sinusoidal,
    AlbersEqualArea,
    EquidistantConic,
    Polyconic,
    VanDerGrinten,
    WagnerIV,
    Bonne,
}

/// 投影识别表: (名称前缀, 类型, 参数行最少字段数)
///
/// 按顺序匹配,第一个命中的前缀生效。参数行的第 0 个字段是标签本身,也计入字段数。
static PROJECTIONS: [(&str, ProjectionKind, usize); 12] = [
    ("Latitude/Longitude", ProjectionKind::LatitudeLongitude, 0),
    ("Mercator", ProjectionKind::Mercator, 0),
    ("Transverse Mercator", ProjectionKind::TransverseMercator, 6),
    ("(UTM) Universal Transverse Mercator", ProjectionKind::Utm, 0),
    ("Lambert Conformal Conic", ProjectionKind::LambertConformalConic, 8),
    ("Sinusoidal", ProjectionKind::Sinusoidal, 3),
    ("Albers Equal Area", ProjectionKind::AlbersEqualArea, 8),
    ("(EQC) Equidistant Conic", ProjectionKind::EquidistantConic, 8),
    ("Polyconic (American)", ProjectionKind::Polyconic, 3),
    ("Van Der Grinten", ProjectionKind::VanDerGrinten, 3),
    ("(WIV) Wagner IV", ProjectionKind::WagnerIV, 3),
    ("Bonne", ProjectionKind::Bonne, 6),
];

impl ProjectionKind {
    /// 按名称识别投影类型(前缀匹配,忽略大小写)
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        PROJECTIONS
            .iter()
            .find(|(prefix, ..)| starts_with_ignore_case(name, prefix))
            .map(|(_, kind, _)| *kind)
    }

    fn entry(&self) -> &'static (&'static str, ProjectionKind, usize) {
        // 表中覆盖了所有类型
        PROJECTIONS
            .iter()
            .find(|(_, kind, _)| kind == self)
            .unwrap_or(&PROJECTIONS[0])
    }

    /// OziExplorer 中的投影名称
    pub fn name(&self) -> &'static str {
        self.entry().0
    }

    /// 参数行最少字段数
    pub fn min_tokens(&self) -> usize {
        self.entry().2
    }
}

/// 投影定义,每种投影只携带它实际使用的参数
///
/// 角度单位为度,距离单位为米。未列出的东偏和北偏均为 0。
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProjectionSpec {
    /// 经纬度,不做投影
    Geographic,
    /// 原点 (0, 0),比例因子 1
    Mercator,
    TransverseMercator {
        latitude_of_origin: f64,
        central_meridian: f64,
        scale_factor: f64,
        false_easting: f64,
        false_northing: f64,
    },
    LambertConformalConic {
        standard_parallel_1: f64,
        standard_parallel_2: f64,
        latitude_of_origin: f64,
        central_meridian: f64,
    },
    Sinusoidal {
        central_meridian: f64,
    },
    AlbersEqualArea {
        standard_parallel_1: f64,
        standard_parallel_2: f64,
        latitude_of_center: f64,
        longitude_of_center: f64,
    },
    EquidistantConic {
        standard_parallel_1: f64,
        standard_parallel_2: f64,
        latitude_of_center: f64,
        longitude_of_center: f64,
    },
    Polyconic {
        central_meridian: f64,
    },
    VanDerGrinten {
        central_meridian: f64,
    },
    WagnerIV {
        central_meridian: f64,
    },
    Bonne {
        standard_parallel_1: f64,
        central_meridian: f64,
    },
}

impl ProjectionSpec {
    /// 由参数行字段构造投影定义
    ///
    /// # 参数
    /// * `kind` - 投影类型
    /// * `tokens` - 按逗号拆分的 `Projection Setup` 行,第 0 个字段为标签
    ///
    /// # 错误
    /// * 字段数少于该投影的最小要求时返回 [`OziError::InsufficientParameters`]
    /// * UTM 返回 [`OziError::UnsupportedProjection`]
    pub fn from_tokens(kind: ProjectionKind, tokens: &[&str]) -> OziResult<Self> {
        if tokens.len() < kind.min_tokens() {
            return Err(OziError::InsufficientParameters {
                projection: kind.name().to_string(),
                required: kind.min_tokens(),
                found: tokens.len(),
            });
        }

        // 字段数已校验,按位置取值
        let p = |i: usize| atof(tokens[i]);

        let spec = match kind {
            ProjectionKind::LatitudeLongitude => ProjectionSpec::Geographic,
            ProjectionKind::Mercator => ProjectionSpec::Mercator,
            ProjectionKind::TransverseMercator => ProjectionSpec::TransverseMercator {
                latitude_of_origin: p(1),
                central_meridian: p(2),
                scale_factor: p(3),
                false_easting: p(4),
                false_northing: p(5),
            },
            ProjectionKind::Utm => {
                return Err(OziError::UnsupportedProjection(kind.name().to_string()))
            }
            ProjectionKind::LambertConformalConic => ProjectionSpec::LambertConformalConic {
                standard_parallel_1: p(6),
                standard_parallel_2: p(7),
                latitude_of_origin: p(1),
                central_meridian: p(2),
            },
            ProjectionKind::Sinusoidal => ProjectionSpec::Sinusoidal {
                central_meridian: p(2),
            },
            ProjectionKind::AlbersEqualArea => ProjectionSpec::AlbersEqualArea {
                standard_parallel_1: p(6),
                standard_parallel_2: p(7),
                latitude_of_center: p(1),
                longitude_of_center: p(2),
            },
            ProjectionKind::EquidistantConic => ProjectionSpec::EquidistantConic {
                standard_parallel_1: p(6),
                standard_parallel_2: p(7),
                latitude_of_center: p(1),
                longitude_of_center: p(2),
            },
            ProjectionKind::Polyconic => ProjectionSpec::Polyconic {
                central_meridian: p(2),
            },
            ProjectionKind::VanDerGrinten => ProjectionSpec::VanDerGrinten {
                central_meridian: p(2),
            },
            ProjectionKind::WagnerIV => ProjectionSpec::WagnerIV {
                central_meridian: p(2),
            },
            ProjectionKind::Bonne => ProjectionSpec::Bonne {
                standard_parallel_1: p(1),
                central_meridian: p(2),
            },
        };
        Ok(spec)
    }

    pub fn is_geographic(&self) -> bool {
        matches!(self, ProjectionSpec::Geographic)
    }

    /// 投影的显示名称,用于 `PROJCS` 的名称
    pub fn name(&self) -> &'static str {
        match self {
            ProjectionSpec::Geographic => "Latitude/Longitude",
            ProjectionSpec::Mercator => "Mercator",
            ProjectionSpec::TransverseMercator { .. } => "Transverse Mercator",
            ProjectionSpec::LambertConformalConic { .. } => "Lambert Conformal Conic",
            ProjectionSpec::Sinusoidal { .. } => "Sinusoidal",
            ProjectionSpec::AlbersEqualArea { .. } => "Albers Equal Area",
            ProjectionSpec::EquidistantConic { .. } => "Equidistant Conic",
            ProjectionSpec::Polyconic { .. } => "Polyconic",
            ProjectionSpec::VanDerGrinten { .. } => "Van Der Grinten",
            ProjectionSpec::WagnerIV { .. } => "Wagner IV",
            ProjectionSpec::Bonne { .. } => "Bonne",
        }
    }

    /// WKT1 中 `PROJECTION` 的方法名
    pub fn wkt_method(&self) -> &'static str {
        match self {
            ProjectionSpec::Geographic => "",
            ProjectionSpec::Mercator => "Mercator_1SP",
            ProjectionSpec::TransverseMercator { .. } => "Transverse_Mercator",
            ProjectionSpec::LambertConformalConic { .. } => "Lambert_Conformal_Conic_2SP",
            ProjectionSpec::Sinusoidal { .. } => "Sinusoidal",
            ProjectionSpec::AlbersEqualArea { .. } => "Albers_Conic_Equal_Area",
            ProjectionSpec::EquidistantConic { .. } => "Equidistant_Conic",
            ProjectionSpec::Polyconic { .. } => "Polyconic",
            ProjectionSpec::VanDerGrinten { .. } => "VanDerGrinten",
            ProjectionSpec::WagnerIV { .. } => "Wagner_IV",
            ProjectionSpec::Bonne { .. } => "Bonne",
        }
    }

    /// WKT1 中的 `PARAMETER` 列表,顺序固定
    pub fn wkt_parameters(&self) -> Vec<(&'static str, f64)> {
        let mut params = match *self {
            ProjectionSpec::Geographic => return Vec::new(),
            ProjectionSpec::Mercator => vec![
                ("latitude_of_origin", 0.0),
                ("central_meridian", 0.0),
                ("scale_factor", 1.0),
            ],
            ProjectionSpec::TransverseMercator {
                latitude_of_origin,
                central_meridian,
                scale_factor,
                false_easting,
                false_northing,
            } => {
                return vec![
                    ("latitude_of_origin", latitude_of_origin),
                    ("central_meridian", central_meridian),
                    ("scale_factor", scale_factor),
                    ("false_easting", false_easting),
                    ("false_northing", false_northing),
                ]
            }
            ProjectionSpec::LambertConformalConic {
                standard_parallel_1,
                standard_parallel_2,
                latitude_of_origin,
                central_meridian,
            } => vec![
                ("standard_parallel_1", standard_parallel_1),
                ("standard_parallel_2", standard_parallel_2),
                ("latitude_of_origin", latitude_of_origin),
                ("central_meridian", central_meridian),
            ],
            ProjectionSpec::AlbersEqualArea {
                standard_parallel_1,
                standard_parallel_2,
                latitude_of_center,
                longitude_of_center,
            }
            | ProjectionSpec::EquidistantConic {
                standard_parallel_1,
                standard_parallel_2,
                latitude_of_center,
                longitude_of_center,
            } => vec![
                ("standard_parallel_1", standard_parallel_1),
                ("standard_parallel_2", standard_parallel_2),
                ("latitude_of_center", latitude_of_center),
                ("longitude_of_center", longitude_of_center),
            ],
            ProjectionSpec::Sinusoidal { central_meridian } => {
                vec![("longitude_of_center", central_meridian)]
            }
            ProjectionSpec::Polyconic { central_meridian } => vec![
                ("latitude_of_origin", 0.0),
                ("central_meridian", central_meridian),
            ],
            ProjectionSpec::VanDerGrinten { central_meridian }
            | ProjectionSpec::WagnerIV { central_meridian } => {
                vec![("central_meridian", central_meridian)]
            }
            ProjectionSpec::Bonne {
                standard_parallel_1,
                central_meridian,
            } => vec![
                ("standard_parallel_1", standard_parallel_1),
                ("central_meridian", central_meridian),
            ],
        };
        params.push(("false_easting", 0.0));
        params.push(("false_northing", 0.0));
        params
    }

    /// proj 字符串中的投影部分
    pub fn to_proj_params(&self) -> String {
        match *self {
            ProjectionSpec::Geographic => "+proj=longlat".to_string(),
            ProjectionSpec::Mercator => "+proj=merc +lon_0=0 +k=1 +x_0=0 +y_0=0".to_string(),
            ProjectionSpec::TransverseMercator {
                latitude_of_origin,
                central_meridian,
                scale_factor,
                false_easting,
                false_northing,
            } => format!(
                "+proj=tmerc +lat_0={latitude_of_origin} +lon_0={central_meridian} \
                 +k={scale_factor} +x_0={false_easting} +y_0={false_northing}"
            ),
            ProjectionSpec::LambertConformalConic {
                standard_parallel_1,
                standard_parallel_2,
                latitude_of_origin,
                central_meridian,
            } => format!(
                "+proj=lcc +lat_1={standard_parallel_1} +lat_2={standard_parallel_2} \
                 +lat_0={latitude_of_origin} +lon_0={central_meridian} +x_0=0 +y_0=0"
            ),
            ProjectionSpec::Sinusoidal { central_meridian } => {
                format!("+proj=sinu +lon_0={central_meridian} +x_0=0 +y_0=0")
            }
            ProjectionSpec::AlbersEqualArea {
                standard_parallel_1,
                standard_parallel_2,
                latitude_of_center,
                longitude_of_center,
            } => format!(
                "+proj=aea +lat_1={standard_parallel_1} +lat_2={standard_parallel_2} \
                 +lat_0={latitude_of_center} +lon_0={longitude_of_center} +x_0=0 +y_0=0"
            ),
            ProjectionSpec::EquidistantConic {
                standard_parallel_1,
                standard_parallel_2,
                latitude_of_center,
                longitude_of_center,
            } => format!(
                "+proj=eqdc +lat_1={standard_parallel_1} +lat_2={standard_parallel_2} \
                 +lat_0={latitude_of_center} +lon_0={longitude_of_center} +x_0=0 +y_0=0"
            ),
            ProjectionSpec::Polyconic { central_meridian } => {
                format!("+proj=poly +lat_0=0 +lon_0={central_meridian} +x_0=0 +y_0=0")
            }
            ProjectionSpec::VanDerGrinten { central_meridian } => {
                format!("+proj=vandg +lon_0={central_meridian} +x_0=0 +y_0=0")
            }
            ProjectionSpec::WagnerIV { central_meridian } => {
                format!("+proj=wag4 +lon_0={central_meridian} +x_0=0 +y_0=0")
            }
            ProjectionSpec::Bonne {
                standard_parallel_1,
                central_meridian,
            } => format!(
                "+proj=bonne +lat_1={standard_parallel_1} +lon_0={central_meridian} +x_0=0 +y_0=0"
            ),
        }
    }
}

/// 投影转换的结果
#[derive(Clone, Debug, PartialEq)]
pub struct Translation {
    /// 解析出的投影定义
    pub spec: ProjectionSpec,
    /// 基准面自身的地理坐标系,控制点经纬度以此为准
    pub source: GeogCs,
    /// 输出坐标所在的空间参考系
    pub target: SpatialRef,
}

/// 把基准面、投影行和参数行转换为空间参考系
///
/// # 参数
/// * `datum` - 已在基准面目录中找到的基准面
/// * `projection_line` - `Map Projection,<名称>,...` 行
/// * `setup_line` - `Projection Setup,...` 行
///
/// # 错误
/// * 投影行没有名称字段时返回 [`OziError::MissingGeoreferenceFields`]
/// * 无法识别的投影名称返回 [`OziError::UnsupportedProjection`]
/// * 参数不足返回 [`OziError::InsufficientParameters`]
pub fn translate(
    datum: &DatumEntry,
    projection_line: &str,
    setup_line: &str,
) -> OziResult<Translation> {
    let projection_tokens = split_fields(projection_line);
    if projection_tokens.len() < 2 {
        return Err(OziError::MissingGeoreferenceFields(
            MissingField::ProjectionName,
        ));
    }
    let name = projection_tokens[1];
    let kind = ProjectionKind::from_name(name)
        .ok_or_else(|| OziError::UnsupportedProjection(name.to_string()))?;

    let spec = ProjectionSpec::from_tokens(kind, &split_fields(setup_line))?;

    let code = datum.target_epsg();
    let geog = match GeogCs::from_epsg(code) {
        Ok(geog) => geog,
        Err(e) => {
            warn!(
                "EPSG:{code} for datum \"{}\" is not available ({e}), using the datum definition",
                datum.name
            );
            datum.geographic()
        }
    };

    let target = if spec.is_geographic() {
        SpatialRef::Geographic(geog)
    } else {
        SpatialRef::Projected {
            geog,
            projection: spec,
        }
    };

    Ok(Translation {
        spec,
        source: datum.geographic(),
        target,
    })
}
