//! 控制点提取
//!
//! `.MAP` 文件中的控制点记录形如:
//!
//! ```text
//! Point01,xy,  512, 384,in, deg,  55, 30.0,N,  37, 15.0,E, grid, ...
//! ```
//!
//! 按逗号拆分后各字段依次为: 标签、类型、像素列、像素行、`in`、`deg`、
//! 纬度度、纬度分、`N`/`S`、经度度、经度分、`E`/`W`。
//! 未使用的控制点位置留空,这类记录被静默跳过。

use crate::error::OziResult;
use crate::map::tokens::{atof, split_fields, starts_with_ignore_case};
use crate::map::MapFile;
use crate::srs::CoordTransform;
use tracing::*;

/// 默认最多保留的控制点数
pub const MAX_GCPS: usize = 30;

const MIN_FIELDS: usize = 12;
const POINT_LABEL: &str = "Point";

/// 地面控制点
#[derive(Clone, Debug, PartialEq)]
pub struct Gcp {
    /// 记录标签,如 `Point01`
    pub id: String,
    /// 像素列
    pub pixel: f64,
    /// 像素行
    pub line: f64,
    /// 目标参考系中的 X(经度或东向)
    pub x: f64,
    /// 目标参考系中的 Y(纬度或北向)
    pub y: f64,
}

/// 一条控制点记录在坐标转换之前的内容
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointRecord<'a> {
    pub id: &'a str,
    pub pixel: f64,
    pub line: f64,
    /// 十进制度,西经为负
    pub lon: f64,
    /// 十进制度,南纬为负
    pub lat: f64,
}

/// 解析一行控制点记录
///
/// 以下情况返回 `None`:
/// * 字段少于 12 个
/// * 第 0 个字段不以 `Point` 开头
/// * 像素行为空
/// * 纬度或经度的度、分任一为空
pub fn parse_point_record(line: &str) -> Option<PointRecord<'_>> {
    let tokens = split_fields(line);
    if tokens.len() < MIN_FIELDS || !starts_with_ignore_case(tokens[0], POINT_LABEL) {
        return None;
    }
    if tokens[3].is_empty() {
        return None;
    }
    if [6, 7, 9, 10].iter().any(|&i| tokens[i].is_empty()) {
        return None;
    }

    let mut lat = atof(tokens[6]) + atof(tokens[7]) / 60.0;
    let mut lon = atof(tokens[9]) + atof(tokens[10]) / 60.0;
    if tokens[8].eq_ignore_ascii_case("S") {
        lat = -lat;
    }
    if tokens[11].eq_ignore_ascii_case("W") {
        lon = -lon;
    }

    Some(PointRecord {
        id: tokens[0],
        pixel: atof(tokens[2]),
        line: atof(tokens[3]),
        lon,
        lat,
    })
}

/// 把经纬度(度)转换到目标参考系
pub trait PointTransform {
    fn transform(&self, lon: f64, lat: f64) -> OziResult<(f64, f64)>;
}

impl PointTransform for CoordTransform {
    fn transform(&self, lon: f64, lat: f64) -> OziResult<(f64, f64)> {
        self.apply(lon, lat)
    }
}

impl<F> PointTransform for F
where
    F: Fn(f64, f64) -> OziResult<(f64, f64)>,
{
    fn transform(&self, lon: f64, lat: f64) -> OziResult<(f64, f64)> {
        self(lon, lat)
    }
}

/// 从 `.MAP` 文件中提取控制点
///
/// 按文件顺序处理第 6 行起的所有记录,最多保留 `max` 个。
/// 坐标转换失败的点会被跳过并记录警告,不会中断解析。
pub fn extract<T: PointTransform + ?Sized>(map: &MapFile, transform: &T, max: usize) -> Vec<Gcp> {
    let mut gcps = Vec::new();
    for line in map.point_records() {
        if gcps.len() >= max {
            debug!("OZI control point limit {max} reached");
            break;
        }
        let Some(record) = parse_point_record(line) else {
            continue;
        };
        match transform.transform(record.lon, record.lat) {
            Ok((x, y)) => gcps.push(Gcp {
                id: record.id.to_string(),
                pixel: record.pixel,
                line: record.line,
                x,
                y,
            }),
            Err(e) => warn!(
                "OZI skipping {} ({}, {}): {e}",
                record.id, record.lon, record.lat
            ),
        }
    }
    gcps
}
