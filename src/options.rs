//! 解析选项
//!
//! 默认值与 OziExplorer 读取器的行为一致,通常无需修改:
//!
//! ```
//! use ozimap::OziOptions;
//!
//! let options = OziOptions::default().with_max_gcps(12).with_approx_fit(true);
//! assert_eq!(options.max_gcps, 12);
//! ```

use crate::datum::DatumCatalog;
use crate::fit::FitOptions;
use crate::gcp::MAX_GCPS;
use crate::map::MapFileOptions;

/// `.MAP` 解析选项
#[derive(Clone, Copy, Debug)]
pub struct OziOptions {
    /// 文件读取限制
    pub map: MapFileOptions,
    /// 最多保留的控制点数
    pub max_gcps: usize,
    /// 地理变换拟合参数
    pub fit: FitOptions,
    /// 基准面目录
    pub catalog: &'static DatumCatalog,
}

impl Default for OziOptions {
    fn default() -> Self {
        Self {
            map: MapFileOptions::default(),
            max_gcps: MAX_GCPS,
            fit: FitOptions::default(),
            catalog: DatumCatalog::builtin(),
        }
    }
}

impl OziOptions {
    /// 设置最多保留的控制点数
    pub fn with_max_gcps(mut self, max_gcps: usize) -> Self {
        self.max_gcps = max_gcps;
        self
    }

    /// 设置最多读取的行数
    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.map.max_lines = max_lines;
        self
    }

    /// 设置地理变换拟合参数
    pub fn with_fit(mut self, fit: FitOptions) -> Self {
        self.fit = fit;
        self
    }

    /// 是否接受有残差的近似拟合
    pub fn with_approx_fit(mut self, approx_ok: bool) -> Self {
        self.fit.approx_ok = approx_ok;
        self
    }

    /// 使用自定义的基准面目录
    pub fn with_catalog(mut self, catalog: &'static DatumCatalog) -> Self {
        self.catalog = catalog;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::DEFAULT_MAX_LINES;

    #[test]
    fn defaults_follow_the_reader() {
        let options = OziOptions::default();
        assert_eq!(options.map.max_lines, DEFAULT_MAX_LINES);
        assert_eq!(options.max_gcps, 30);
        assert!(!options.fit.approx_ok);
        assert_eq!(options.fit.max_error_pixels, 0.25);
        assert_eq!(options.catalog.len(), DatumCatalog::builtin().len());
    }

    #[test]
    fn builders_override_single_fields() {
        let options = OziOptions::default()
            .with_max_lines(50)
            .with_fit(FitOptions {
                approx_ok: false,
                max_error_pixels: 1.0,
            })
            .with_approx_fit(true);
        assert_eq!(options.map.max_lines, 50);
        assert!(options.fit.approx_ok);
        assert_eq!(options.fit.max_error_pixels, 1.0);
        assert_eq!(options.max_gcps, 30);
    }
}
