//! 解析管线与只读数据集接口
//!
//! [`parse_map`] 依次完成: 读取文件 → 查找基准面 → 转换投影 →
//! 提取控制点 → 拟合地理变换。任一步骤出错即返回,不会产生部分结果。
//!
//! [`OziMap`] 在此基础上提供栅格数据集式的查询接口。

use crate::error::{OziError, OziResult};
use crate::fit::{fit, GeoReference, GeoTransform};
use crate::gcp::{extract, Gcp};
use crate::map::MapFile;
use crate::options::OziOptions;
use crate::projection::translate;
use crate::srs::{CoordTransform, SpatialRef};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::*;

/// 一个 `.MAP` 文件的完整地理参考
#[derive(Clone, Debug, PartialEq)]
pub struct Georeference {
    /// 图像文件名,图像路径无法解析时为 `None`
    pub image_name: Option<String>,
    /// 仿射变换或原始控制点
    pub reference: GeoReference,
    /// 输出坐标所在的空间参考系
    pub srs: SpatialRef,
    /// `srs` 的 WKT 文本
    pub wkt: String,
}

/// 解析 `.MAP` 文本
pub fn parse_map(text: &str, options: &OziOptions) -> OziResult<Georeference> {
    let map = MapFile::parse_with(text, &options.map)?;
    georeference(&map, options)
}

/// 由已读取的 `.MAP` 文件计算地理参考
pub fn georeference(map: &MapFile, options: &OziOptions) -> OziResult<Georeference> {
    let fields = map.georeference_fields()?;
    let datum = options.catalog.lookup(fields.datum)?;
    let translation = translate(datum, fields.projection, fields.setup)?;
    debug!(
        "OZI datum \"{}\" -> EPSG:{}, {}",
        datum.name,
        datum.target_epsg(),
        translation.spec.name()
    );

    let transform = CoordTransform::new(&translation.source, &translation.target)?;
    let gcps = extract(map, &transform, options.max_gcps);
    debug!("OZI {} control points", gcps.len());

    let reference = fit(gcps, &options.fit)?;
    let wkt = translation.target.to_wkt();

    Ok(Georeference {
        image_name: map.image_name().map(str::to_string),
        reference,
        srs: translation.target,
        wkt,
    })
}

/// 只读的 OziExplorer 地图数据集
///
/// 只暴露地理参考信息,栅格数据本身由其他读取器负责。
#[derive(Clone, Debug)]
pub struct OziMap {
    map: MapFile,
    georeference: Georeference,
    path: Option<PathBuf>,
}

impl OziMap {
    /// 打开 `.map` 文件
    pub fn open<P: AsRef<Path>>(path: P, options: &OziOptions) -> OziResult<Self> {
        let path = path.as_ref();
        let map = MapFile::open(path, &options.map)?;
        let georeference = georeference(&map, options)?;
        Ok(Self {
            map,
            georeference,
            path: Some(path.to_path_buf()),
        })
    }

    /// 解析 `.MAP` 文本
    pub fn parse(text: &str, options: &OziOptions) -> OziResult<Self> {
        let map = MapFile::parse_with(text, &options.map)?;
        let georeference = georeference(&map, options)?;
        Ok(Self {
            map,
            georeference,
            path: None,
        })
    }

    pub fn map_file(&self) -> &MapFile {
        &self.map
    }

    pub fn georeference(&self) -> &Georeference {
        &self.georeference
    }

    /// 仿射地理变换
    ///
    /// 只有控制点时返回单位变换 `[0, 1, 0, 0, 0, 1]`。
    pub fn geo_transform(&self) -> GeoTransform {
        self.georeference
            .reference
            .geo_transform()
            .copied()
            .unwrap_or(GeoTransform::IDENTITY)
    }

    /// 控制点,存在仿射变换时为空
    pub fn gcps(&self) -> &[Gcp] {
        self.georeference.reference.gcps()
    }

    /// 空间参考系的 WKT
    pub fn projection_ref(&self) -> &str {
        &self.georeference.wkt
    }

    /// 控制点坐标所在参考系的 WKT,与 [`OziMap::projection_ref`] 相同
    pub fn gcp_projection(&self) -> &str {
        &self.georeference.wkt
    }

    pub fn spatial_ref(&self) -> &SpatialRef {
        &self.georeference.srs
    }

    pub fn image_name(&self) -> Option<&str> {
        self.georeference.image_name.as_deref()
    }

    /// 图像文件路径
    ///
    /// 从文件打开时相对于 `.map` 所在目录,否则就是图像文件名本身。
    pub fn image_path(&self) -> Option<PathBuf> {
        let name = self.image_name()?;
        let dir = self.path.as_deref().and_then(Path::parent);
        Some(match dir {
            Some(dir) => dir.join(name),
            None => PathBuf::from(name),
        })
    }
}

impl FromStr for OziMap {
    type Err = OziError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text, &OziOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MissingField;

    const MAP: &str = "OziExplorer Map Data File Version 2.2\r\n\
        Test Map\r\n\
        C:\\Maps\\test.png\r\n\
        1 ,Map Code,\r\n\
        WGS 84,WGS 84,   0.0000,   0.0000,WGS 84\r\n\
        Reserved 1\r\n\
        Reserved 2\r\n\
        Magnetic Variation,,,E\r\n\
        Map Projection,Latitude/Longitude,PolyCal,No,AutoCalOnly,No,BSBUseWPX,No\r\n\
        Point01,xy,    0,    0,in, deg,  10,  0.0,N,  20,  0.0,E, grid,   ,           ,           ,N\r\n\
        Point02,xy,  100,    0,in, deg,  10,  0.0,N,  21,  0.0,E, grid,   ,           ,           ,N\r\n\
        Point03,xy,    0,  100,in, deg,   9,  0.0,N,  20,  0.0,E, grid,   ,           ,           ,N\r\n\
        Point04,xy,     ,     ,in, deg,    ,     ,N,    ,     ,E, grid,   ,           ,           ,N\r\n\
        Projection Setup,,,,,,,,,,\r\n";

    #[test]
    fn geographic_map_fits_affine() {
        let ozi: OziMap = MAP.parse().unwrap();
        let gt = ozi.geo_transform();
        let expected = [20.0, 0.01, 0.0, 10.0, 0.0, -0.01];
        for (a, b) in gt.0.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-9, "{:?}", gt.0);
        }
        assert!(ozi.gcps().is_empty());
        assert!(ozi.projection_ref().starts_with("GEOGCS[\"WGS 84\""));
        assert_eq!(ozi.projection_ref(), ozi.gcp_projection());
        assert_eq!(ozi.image_name(), Some("test.png"));
        assert_eq!(ozi.image_path(), Some(PathBuf::from("test.png")));
    }

    #[test]
    fn two_points_fall_back_to_gcps() {
        let text = MAP.replace("Point03,xy,    0,  100", "Point03,xy,     ,     ");
        let ozi = OziMap::parse(&text, &OziOptions::default()).unwrap();
        assert_eq!(ozi.geo_transform(), GeoTransform::IDENTITY);
        assert_eq!(ozi.gcps().len(), 2);
        assert_eq!(ozi.gcps()[1].id, "Point02");
        assert_eq!((ozi.gcps()[1].x, ozi.gcps()[1].y), (21.0, 10.0));
    }

    #[test]
    fn pipeline_short_circuits_on_first_error() {
        let text = MAP.replace("WGS 84,WGS 84,", "Atlantis,WGS 84,");
        assert!(matches!(
            parse_map(&text, &OziOptions::default()),
            Err(OziError::UnsupportedDatum(_))
        ));

        let text = MAP.replace("Projection Setup,,,,,,,,,,\r\n", "");
        assert!(matches!(
            parse_map(&text, &OziOptions::default()),
            Err(OziError::MissingGeoreferenceFields(
                MissingField::ProjectionSetupLine
            ))
        ));

        let text: String = MAP
            .lines()
            .filter(|line| !line.starts_with("Point"))
            .map(|line| format!("{line}\n"))
            .collect();
        assert!(matches!(
            parse_map(&text, &OziOptions::default()),
            Err(OziError::NoControlPoints)
        ));
    }

    #[test]
    fn gcp_limit_applies_before_fitting() {
        let options = OziOptions::default().with_max_gcps(2);
        let georef = parse_map(MAP, &options).unwrap();
        assert_eq!(georef.reference.gcps().len(), 2);
    }
}
