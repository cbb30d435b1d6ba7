//! 基准面目录
//!
//! OziExplorer 在 `.MAP` 文件第 5 行写入基准面的显示名称。本模块把这些名称映射为
//! 椭球体与到 WGS84 的三参数转换,并给出输出时使用的标准 EPSG 地理坐标系。
//!
//! 目录是编译期的静态表,不可修改,可在任意线程中共享。

use crate::error::{OziError, OziResult};
use crate::srs::{wkt_identifier, AngularUnit, Ellipsoid, GeogCs, HelmertShift, EPSG_WGS84};

mod table;

/// 基准面目录中的一项
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DatumEntry {
    /// OziExplorer 使用的显示名称
    pub name: &'static str,
    /// 对应的 EPSG 地理坐标系,`None` 表示没有
    pub epsg: Option<u16>,
    pub ellipsoid: Ellipsoid,
    /// 到 WGS84 的转换参数
    pub shift: Option<HelmertShift>,
}

impl DatumEntry {
    /// 输出坐标所用地理坐标系的 EPSG 代码
    ///
    /// 没有对应代码的基准面统一输出为 WGS84。
    pub fn target_epsg(&self) -> u16 {
        self.epsg.unwrap_or(EPSG_WGS84)
    }

    /// 由本表项自身参数构造的地理坐标系,作为坐标转换的源
    pub fn geographic(&self) -> GeogCs {
        let datum = match self.name {
            "WGS 84" => "WGS_1984".to_string(),
            "NAD83" => "North_American_Datum_1983".to_string(),
            name if name.starts_with("NAD27") => "North_American_Datum_1927".to_string(),
            name => wkt_identifier(name),
        };
        GeogCs {
            name: self.name.to_string(),
            datum,
            ellipsoid: self.ellipsoid,
            towgs84: self.shift,
            prime_meridian: 0.0,
            angular_unit: AngularUnit::Degree,
            epsg: None,
        }
    }
}

/// 按名称查找基准面的目录
#[derive(Clone, Copy, Debug)]
pub struct DatumCatalog {
    entries: &'static [DatumEntry],
}

static BUILTIN: DatumCatalog = DatumCatalog {
    entries: table::DATUMS,
};

impl Default for DatumCatalog {
    fn default() -> Self {
        BUILTIN
    }
}

impl DatumCatalog {
    /// OziExplorer 支持的全部基准面
    pub fn builtin() -> &'static DatumCatalog {
        &BUILTIN
    }

    /// 使用自定义表构造目录
    pub const fn new(entries: &'static [DatumEntry]) -> Self {
        Self { entries }
    }

    /// 按名称查找(忽略 ASCII 大小写,首尾空白不参与比较)
    ///
    /// # 错误
    /// 名称不在目录中时返回 [`OziError::UnsupportedDatum`]
    pub fn lookup(&self, name: &str) -> OziResult<&'static DatumEntry> {
        let name = name.trim();
        self.entries
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| OziError::UnsupportedDatum(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static DatumEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
