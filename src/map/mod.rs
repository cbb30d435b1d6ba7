//! OziExplorer `.MAP` 文件读取模块
//!
//! `.MAP` 是一种按行组织的纯文本格式,各行的含义由其位置或行首标签决定:
//!
//! | 行号(从 0 起) | 内容 |
//! |---|---|
//! | 0 | 签名 `OziExplorer Map Data File Version <版本>` |
//! | 2 | 所引用的栅格图像路径 |
//! | 4 | 基准面名称 |
//! | 任意 | `Map Projection,<名称>,...` |
//! | 任意 | `Projection Setup,<p1>,<p2>,...` |
//! | 5 起 | `Point<NN>,...` 控制点记录 |
//!
//! 本模块只负责校验签名和定位这些字段,字段的语义解释由
//! [`crate::datum`]、[`crate::projection`] 和 [`crate::gcp`] 完成。

use crate::error::{MissingField, OziError, OziResult};
use std::path::Path;
use tracing::*;

pub mod tokens;

use tokens::{split_fields, starts_with_ignore_case, tokenize};

/// 文件签名前缀
pub const SIGNATURE: &str = "OziExplorer Map Data File Version ";

/// 默认最多读取的行数
pub const DEFAULT_MAX_LINES: usize = 1000;

const MIN_LINES: usize = 5;
const IMAGE_LINE: usize = 2;
const DATUM_LINE: usize = 4;
const FIRST_RECORD_LINE: usize = 5;

const PROJECTION_LABEL: &str = "Map Projection";
const SETUP_LABEL: &str = "Projection Setup";

/// 读取 `.MAP` 文件时的限制
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapFileOptions {
    /// 最多读取的行数,超出部分被忽略
    pub max_lines: usize,
}

impl Default for MapFileOptions {
    fn default() -> Self {
        Self {
            max_lines: DEFAULT_MAX_LINES,
        }
    }
}

/// 快速判断文件头是否为 OziExplorer Map 文件
///
/// 文件头至少需要包含完整的签名前缀。
pub fn identify(header: &[u8]) -> bool {
    header.len() >= SIGNATURE.len() && header.starts_with(SIGNATURE.as_bytes())
}

/// 地理参考所需的三个字段
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeoreferenceFields<'a> {
    /// 基准面名称
    pub datum: &'a str,
    /// `Map Projection` 行
    pub projection: &'a str,
    /// `Projection Setup` 行
    pub setup: &'a str,
}

/// 已通过签名校验的 `.MAP` 文件
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapFile {
    lines: Vec<String>,
}

impl MapFile {
    /// 使用默认限制解析文本
    pub fn parse(text: &str) -> OziResult<Self> {
        Self::parse_with(text, &MapFileOptions::default())
    }

    /// 解析文本
    ///
    /// # 错误
    /// * 少于 5 行
    /// * 第一行不以签名开头
    pub fn parse_with(text: &str, options: &MapFileOptions) -> OziResult<Self> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let lines: Vec<String> = text
            .lines()
            .take(options.max_lines)
            .map(str::to_string)
            .collect();

        for (i, line) in lines.iter().enumerate() {
            debug!("OZI {i:>3}: {line}");
        }

        if lines.len() < MIN_LINES {
            return Err(OziError::FileFormat(format!(
                "{} lines, at least {MIN_LINES} required",
                lines.len()
            )));
        }
        if !starts_with_ignore_case(&lines[0], SIGNATURE) {
            return Err(OziError::FileFormat(format!(
                "first line does not start with \"{}\"",
                SIGNATURE.trim_end()
            )));
        }

        Ok(Self { lines })
    }

    /// 解析字节内容
    ///
    /// Ozi 文件常以本地代码页保存,无效的 UTF-8 序列会被替换而不是报错。
    pub fn from_bytes(bytes: &[u8], options: &MapFileOptions) -> OziResult<Self> {
        Self::parse_with(&String::from_utf8_lossy(bytes), options)
    }

    /// 从文件系统读取并解析
    pub fn open<P: AsRef<Path>>(path: P, options: &MapFileOptions) -> OziResult<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes, options)
    }

    /// 全部文本行
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// 第 3 行的原始图像路径
    pub fn image_path(&self) -> &str {
        self.lines[IMAGE_LINE].trim()
    }

    /// 图像文件名,即图像路径按 `\` 和 `/` 拆分后的最后一段
    ///
    /// 路径为空或以分隔符结尾时返回 `None`。
    pub fn image_name(&self) -> Option<&str> {
        tokenize(&self.lines[IMAGE_LINE], &['\\', '/'])
            .last()
            .copied()
            .filter(|name| !name.is_empty())
    }

    /// 基准面名称(第 5 行的第一个逗号字段)
    pub fn datum_name(&self) -> &str {
        split_fields(&self.lines[DATUM_LINE])
            .first()
            .copied()
            .unwrap_or("")
    }

    /// `Map Projection` 行
    pub fn projection_line(&self) -> Option<&str> {
        self.find_labelled(PROJECTION_LABEL)
    }

    /// `Projection Setup` 行
    pub fn projection_setup_line(&self) -> Option<&str> {
        self.find_labelled(SETUP_LABEL)
    }

    /// 第 6 行起的候选控制点记录
    pub fn point_records(&self) -> impl Iterator<Item = &str> + '_ {
        self.lines[FIRST_RECORD_LINE..].iter().map(String::as_str)
    }

    /// 收集地理参考所需字段,任一缺失即报错
    pub fn georeference_fields(&self) -> OziResult<GeoreferenceFields<'_>> {
        let datum = self.datum_name();
        if datum.is_empty() {
            return Err(OziError::MissingGeoreferenceFields(MissingField::DatumName));
        }
        let projection = self
            .projection_line()
            .ok_or(OziError::MissingGeoreferenceFields(MissingField::ProjectionLine))?;
        let setup = self
            .projection_setup_line()
            .ok_or(OziError::MissingGeoreferenceFields(
                MissingField::ProjectionSetupLine,
            ))?;
        Ok(GeoreferenceFields {
            datum,
            projection,
            setup,
        })
    }

    // 同一标签出现多次时以最后一行为准
    fn find_labelled(&self, label: &str) -> Option<&str> {
        self.lines[FIRST_RECORD_LINE..]
            .iter()
            .rev()
            .find(|line| starts_with_ignore_case(line, label))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "OziExplorer Map Data File Version 2.2\n\
                          Sample\n\
                          C:\\OziExplorer\\Maps\\sample.ozf2\n\
                          1 ,Map Code,\n\
                          Pulkovo 1942 (2),WGS 84,   0.0000,   0.0000,WGS 84\n\
                          Reserved 1\n\
                          Reserved 2\n\
                          Magnetic Variation,,,E\n\
                          Map Projection,Transverse Mercator,PolyCal,No,AutoCalOnly,No,BSBUseWPX,No\n\
                          Point01,xy,  100,  200,in, deg,  55,  30,N,  37,  15,E, grid,   ,  ,  ,N\n\
                          Projection Setup,0,39,1,7500000,0,,,,,\n";

    #[test]
    fn locates_fixed_role_lines() {
        let map = MapFile::parse(HEADER).unwrap();
        assert_eq!(map.image_path(), r"C:\OziExplorer\Maps\sample.ozf2");
        assert_eq!(map.image_name(), Some("sample.ozf2"));
        assert_eq!(map.datum_name(), "Pulkovo 1942 (2)");
        assert!(map.projection_line().unwrap().contains("Transverse Mercator"));
        assert!(map.projection_setup_line().unwrap().starts_with("Projection Setup,0,39"));
        assert_eq!(map.point_records().count(), map.lines().len() - 5);

        let fields = map.georeference_fields().unwrap();
        assert_eq!(fields.datum, "Pulkovo 1942 (2)");
    }

    #[test]
    fn rejects_bad_signature_and_short_files() {
        let err = MapFile::parse("Not a map\n1\n2\n3\n4\n").unwrap_err();
        assert!(matches!(err, OziError::FileFormat(_)));

        let err = MapFile::parse("OziExplorer Map Data File Version 2.2\n1\n2\n3\n").unwrap_err();
        assert!(matches!(err, OziError::FileFormat(_)));
    }

    #[test]
    fn accepts_crlf_and_bom() {
        let text = "\u{feff}OziExplorer Map Data File Version 2.2\r\nt\r\nimg.png\r\n1\r\nWGS 84\r\n";
        let map = MapFile::parse(text).unwrap();
        assert_eq!(map.image_name(), Some("img.png"));
        assert_eq!(map.datum_name(), "WGS 84");
    }

    #[test]
    fn reports_missing_georeference_fields() {
        let text = "OziExplorer Map Data File Version 2.2\nt\nimg.png\n1\nWGS 84\nMap Projection,Mercator\n";
        let map = MapFile::parse(text).unwrap();
        assert!(matches!(
            map.georeference_fields(),
            Err(OziError::MissingGeoreferenceFields(
                MissingField::ProjectionSetupLine
            ))
        ));

        let text = "OziExplorer Map Data File Version 2.2\nt\nimg.png\n1\n\nProjection Setup,\n";
        let map = MapFile::parse(text).unwrap();
        assert!(matches!(
            map.georeference_fields(),
            Err(OziError::MissingGeoreferenceFields(MissingField::DatumName))
        ));
    }

    #[test]
    fn image_name_absent_without_failing_parse() {
        let text = "OziExplorer Map Data File Version 2.2\nt\n\n1\nWGS 84\n";
        let map = MapFile::parse(text).unwrap();
        assert_eq!(map.image_name(), None);

        let text = "OziExplorer Map Data File Version 2.2\nt\nmaps/\n1\nWGS 84\n";
        assert_eq!(MapFile::parse(text).unwrap().image_name(), None);
    }

    #[test]
    fn stops_reading_at_line_limit() {
        let mut text = String::from(HEADER);
        text.push_str("Projection Setup,late\n");
        let options = MapFileOptions { max_lines: 11 };
        let map = MapFile::parse_with(&text, &options).unwrap();
        assert_eq!(map.lines().len(), 11);
        assert!(map.projection_setup_line().unwrap().contains("7500000"));
    }

    #[test]
    fn identifies_header_bytes() {
        assert!(identify(b"OziExplorer Map Data File Version 2.2\r\n"));
        assert!(!identify(b"OziExplorer Map Data File"));
        assert!(!identify(b"GIF89a"));
    }
}
