//! 地理参考解析错误模块
//!
//! 本模块定义了解析 OziExplorer `.MAP` 文件时可能出现的全部错误类型。
//!
//! # 错误分类
//!
//! ## 文件格式错误
//! - 签名行缺失或不匹配
//! - 行数不足
//!
//! ## 地理参考字段错误
//! - 缺少投影行、投影参数行或基准面名称
//! - 未知的基准面或投影名称
//! - 投影参数数量不足
//!
//! ## 控制点错误
//! - 没有任何可用的控制点
//!
//! 注意: 控制点退化(共线或数量不足)不是错误,
//! 而是以原始控制点列表的形式返回,参见 [`crate::fit`]。

use std::fmt;
use std::io;
use thiserror::Error;

/// 解析操作的通用结果类型
pub type OziResult<T> = Result<T, OziError>;

/// 缺失的地理参考字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    /// 第 5 行(索引 4)的基准面名称为空
    DatumName,
    /// 没有以 `Map Projection` 开头的行
    ProjectionLine,
    /// 投影行中没有投影名称
    ProjectionName,
    /// 没有以 `Projection Setup` 开头的行
    ProjectionSetupLine,
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MissingField::DatumName => "datum name",
            MissingField::ProjectionLine => "Map Projection line",
            MissingField::ProjectionName => "projection name",
            MissingField::ProjectionSetupLine => "Projection Setup line",
        };
        f.write_str(name)
    }
}

/// `.MAP` 解析管线中所有可能出现的错误
#[derive(Debug, Error)]
pub enum OziError {
    /// 文件不是 OziExplorer Map 格式(签名错误或行数不足)
    #[error("not an OziExplorer map file: {0}")]
    FileFormat(String),

    /// 缺少必需的地理参考字段
    #[error("map file is not georeferenced correctly: missing {0}")]
    MissingGeoreferenceFields(MissingField),

    /// 基准面名称不在基准面目录中
    #[error("unsupported datum \"{0}\"")]
    UnsupportedDatum(String),

    /// 无法识别的投影名称
    #[error("unsupported projection \"{0}\"")]
    UnsupportedProjection(String),

    /// 投影参数行的字段数少于该投影要求的最小值
    #[error("projection \"{projection}\" needs {required} setup fields, found {found}")]
    InsufficientParameters {
        projection: String,
        required: usize,
        found: usize,
    },

    /// 没有解析出任何控制点
    #[error("map file contains no usable control points")]
    NoControlPoints,

    /// 大地测量库(proj4rs / EPSG 定义)错误
    #[error("geodesy error: {0}")]
    Geodesy(String),

    /// 文件读取错误
    #[error("read error: {0}")]
    Read(#[from] io::Error),
}

/// 从 proj4rs 错误转换
impl From<proj4rs::errors::Error> for OziError {
    fn from(e: proj4rs::errors::Error) -> Self {
        OziError::Geodesy(format!("{e:?}"))
    }
}
