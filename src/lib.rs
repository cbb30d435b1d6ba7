//! 这是一个用于解析 OziExplorer `.MAP` 地理参考文件的库
//!
//! `.MAP` 是 OziExplorer 为扫描地图图像保存的文本附属文件,记录了:
//! - 所引用的图像文件
//! - 基准面名称
//! - 投影名称及参数
//! - 若干像素坐标与经纬度对应的地面控制点
//!
//! # 主要功能
//! - 读取和校验 `.MAP` 文件
//! - 把 OziExplorer 的基准面名称映射到椭球体与 EPSG 坐标系
//! - 把投影名称和参数转换为空间参考系(proj 字符串与 WKT)
//! - 提取控制点并转换到目标坐标系
//! - 拟合六参数仿射地理变换,无法拟合时保留控制点
//!
//! # 示例
//! ```no_run
//! use ozimap::{OziMap, OziOptions};
//!
//! let map = OziMap::open("maps/sample.map", &OziOptions::default())?;
//! println!("图像: {:?}", map.image_path());
//! println!("地理变换: {:?}", map.geo_transform());
//! println!("投影: {}", map.projection_ref());
//! # Ok::<(), ozimap::OziError>(())
//! ```

// 导出主要模块
pub mod dataset; // 解析管线与数据集接口
pub mod datum; // 基准面目录
pub mod error; // 错误类型
pub mod fit; // 地理变换拟合
pub mod gcp; // 控制点提取
pub mod map; // .MAP 文件读取
pub mod options; // 解析选项
pub mod projection; // 投影转换
pub mod srs; // 空间参考系

// 重新导出常用类型
pub use dataset::{georeference, parse_map, Georeference, OziMap};
pub use datum::{DatumCatalog, DatumEntry};
pub use error::{MissingField, OziError, OziResult};
pub use fit::{fit, FitOptions, GeoReference, GeoTransform};
pub use gcp::{Gcp, MAX_GCPS};
pub use map::{identify, MapFile};
pub use options::OziOptions;
pub use projection::{translate, ProjectionKind, ProjectionSpec, Translation};
pub use srs::{AngularUnit, CoordTransform, GeogCs, SpatialRef};
