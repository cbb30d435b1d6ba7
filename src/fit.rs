//! 由控制点拟合仿射地理变换
//!
//! 对 X 和 Y 分别做中心化的普通最小二乘拟合。以下情况不是错误,
//! 而是退回到原始控制点列表 [`GeoReference::Gcps`]:
//!
//! * 少于 3 个控制点
//! * 控制点共线,法方程奇异
//! * 不允许近似时,任一控制点的残差超过阈值

use crate::error::{OziError, OziResult};
use crate::gcp::Gcp;
use tracing::*;

/// 六参数仿射地理变换
///
/// ```text
/// X = gt[0] + pixel * gt[1] + line * gt[2]
/// Y = gt[3] + pixel * gt[4] + line * gt[5]
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoTransform(pub [f64; 6]);

impl GeoTransform {
    /// 像素坐标即地理坐标
    pub const IDENTITY: GeoTransform = GeoTransform([0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);

    /// 像素坐标转换为地理坐标
    pub fn apply(&self, pixel: f64, line: f64) -> (f64, f64) {
        let gt = &self.0;
        (
            gt[0] + pixel * gt[1] + line * gt[2],
            gt[3] + pixel * gt[4] + line * gt[5],
        )
    }

    /// 左上角像素角点的地理坐标
    pub fn origin(&self) -> (f64, f64) {
        (self.0[0], self.0[3])
    }

    /// 像素宽度与高度(北向朝上的图像高度为负)
    pub fn pixel_size(&self) -> (f64, f64) {
        (self.0[1], self.0[5])
    }

    /// 逆变换(地理坐标到像素坐标),不可逆时返回 `None`
    pub fn invert(&self) -> Option<GeoTransform> {
        let [x0, a, b, y0, d, e] = self.0;
        let det = a * e - b * d;
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let ia = e / det;
        let ib = -b / det;
        let id = -d / det;
        let ie = a / det;
        Some(GeoTransform([
            -x0 * ia - y0 * ib,
            ia,
            ib,
            -x0 * id - y0 * ie,
            id,
            ie,
        ]))
    }
}

impl Default for GeoTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// 拟合参数
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitOptions {
    /// 为 `true` 时不检查残差,任何非奇异的拟合都被接受
    pub approx_ok: bool,
    /// 允许的最大残差,以像素尺寸为单位
    pub max_error_pixels: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            approx_ok: false,
            max_error_pixels: 0.25,
        }
    }
}

/// 地理参考的最终形式
#[derive(Clone, Debug, PartialEq)]
pub enum GeoReference {
    /// 控制点可以由仿射变换精确表达
    Affine(GeoTransform),
    /// 无法拟合,保留原始控制点
    Gcps(Vec<Gcp>),
}

impl GeoReference {
    pub fn geo_transform(&self) -> Option<&GeoTransform> {
        match self {
            GeoReference::Affine(gt) => Some(gt),
            GeoReference::Gcps(_) => None,
        }
    }

    pub fn gcps(&self) -> &[Gcp] {
        match self {
            GeoReference::Affine(_) => &[],
            GeoReference::Gcps(gcps) => gcps,
        }
    }
}

/// 拟合仿射地理变换
///
/// # 错误
/// 没有控制点时返回 [`OziError::NoControlPoints`]
pub fn fit(points: Vec<Gcp>, options: &FitOptions) -> OziResult<GeoReference> {
    if points.is_empty() {
        return Err(OziError::NoControlPoints);
    }
    if points.len() < 3 {
        debug!("OZI {} control points, too few for an affine fit", points.len());
        return Ok(GeoReference::Gcps(points));
    }

    let Some(gt) = least_squares(&points) else {
        debug!("OZI control points are collinear, keeping them as GCPs");
        return Ok(GeoReference::Gcps(points));
    };

    if !options.approx_ok {
        let [_, a, b, _, d, e] = gt.0;
        let pixel_size = 0.5 * (a.abs() + b.abs() + d.abs() + e.abs());
        let tolerance = options.max_error_pixels * pixel_size;

        let worst = points.iter().find(|p| {
            let (x, y) = gt.apply(p.pixel, p.line);
            (x - p.x).abs() > tolerance || (y - p.y).abs() > tolerance
        });
        if let Some(p) = worst {
            debug!(
                "OZI {} does not fit an affine transform within {} pixel, keeping GCPs",
                p.id, options.max_error_pixels
            );
            return Ok(GeoReference::Gcps(points));
        }
    }

    Ok(GeoReference::Affine(gt))
}

/// 中心化的最小二乘解,法方程奇异时返回 `None`
fn least_squares(points: &[Gcp]) -> Option<GeoTransform> {
    let n = points.len() as f64;
    let (mut mp, mut ml, mut mx, mut my) = (0.0, 0.0, 0.0, 0.0);
    for p in points {
        mp += p.pixel;
        ml += p.line;
        mx += p.x;
        my += p.y;
    }
    mp /= n;
    ml /= n;
    mx /= n;
    my /= n;

    let (mut spp, mut spl, mut sll) = (0.0, 0.0, 0.0);
    let (mut spx, mut slx, mut spy, mut sly) = (0.0, 0.0, 0.0, 0.0);
    for p in points {
        let dp = p.pixel - mp;
        let dl = p.line - ml;
        let dx = p.x - mx;
        let dy = p.y - my;
        spp += dp * dp;
        spl += dp * dl;
        sll += dl * dl;
        spx += dp * dx;
        slx += dl * dx;
        spy += dp * dy;
        sly += dl * dy;
    }

    // 相对阈值,与像素坐标的量级无关
    let det = spp * sll - spl * spl;
    if !det.is_finite() || det.abs() <= 1e-12 * spp * sll || det == 0.0 {
        return None;
    }

    let a = (spx * sll - slx * spl) / det;
    let b = (slx * spp - spx * spl) / det;
    let d = (spy * sll - sly * spl) / det;
    let e = (sly * spp - spy * spl) / det;

    Some(GeoTransform([
        mx - a * mp - b * ml,
        a,
        b,
        my - d * mp - e * ml,
        d,
        e,
    ]))
}
