//! 内置的 OziExplorer 基准面表
//!
//! 名称与 OziExplorer 写入 `.MAP` 文件的拼写完全一致,包括其中的笔误
//! (如 `Cape Cannaveral`、`Nahrwn Saudi Arbia`),因为查找按全名匹配。

use super::DatumEntry;
use crate::srs::{Ellipsoid, HelmertShift};

use Ellipsoid::*;

/// 三参数转换的表项,`epsg` 为 0 表示没有对应的 EPSG 地理坐标系
const fn d(name: &'static str, epsg: u16, ellipsoid: Ellipsoid, shift: [f64; 3]) -> DatumEntry {
    DatumEntry {
        name,
        epsg: if epsg == 0 { None } else { Some(epsg) },
        ellipsoid,
        shift: Some(HelmertShift::ThreeParam(shift)),
    }
}

const fn axes(a: f64, b: f64) -> Ellipsoid {
    Custom { a, b }
}

pub(super) static DATUMS: &[DatumEntry] = &[
    d("Adindan", 4201, Clarke1880, [-162.0, -12.0, 206.0]),
    d("Afgooye", 4205, Krassowsky, [-43.0, -163.0, 45.0]),
    d("Ain el Abd 1970", 4204, International1924, [-150.0, -251.0, -2.0]),
    d("Anna 1 Astro 1965", 0, AustralianNational, [-491.0, -22.0, 435.0]),
    d("Arc 1950", 4209, Clarke1880, [-143.0, -90.0, -294.0]),
    d("Arc 1960", 4210, Clarke1880, [-160.0, -8.0, -300.0]),
    d("Ascension Island 1958", 4712, International1924, [-207.0, 107.0, 52.0]),
    d("Astro B4 Sorol Atoll", 0, International1924, [114.0, -116.0, -333.0]),
    d("Astro Beacon 1945", 0, International1924, [145.0, 75.0, -272.0]),
    d("Astro DOS 71/4", 0, International1924, [-320.0, 550.0, -494.0]),
    d("Astronomic Stn 1952", 0, International1924, [124.0, -234.0, -25.0]),
    d("Australian Geodetic 1966", 4202, AustralianNational, [-133.0, -48.0, 148.0]),
    d("Australian Geodetic 1984", 4203, AustralianNational, [-134.0, -48.0, 149.0]),
    d("Australian Geocentric 1994 (GDA94)", 4283, Grs80, [0.0, 0.0, 0.0]),
    d("Austrian", 0, Bessel1841, [594.0, 84.0, 471.0]),
    d("Bellevue (IGN)", 4714, International1924, [-127.0, -769.0, 472.0]),
    d("Bermuda 1957", 4216, Clarke1866, [-73.0, 213.0, 296.0]),
    d("Bogota Observatory", 4218, International1924, [307.0, 304.0, -318.0]),
    d("Campo Inchauspe", 4221, International1924, [-148.0, 136.0, 90.0]),
    d("Canton Astro 1966", 0, International1924, [298.0, -304.0, -375.0]),
    d("Cape", 4222, Clarke1880, [-136.0, -108.0, -292.0]),
    d("Cape Cannaveral", 4717, Clarke1866, [-2.0, 150.0, 181.0]),
    d("Carthage", 4223, Clarke1880, [-263.0, 6.0, 431.0]),
    d("CH-1903", 4150, Bessel1841, [674.0, 15.0, 405.0]),
    d("Chatham 1971", 4672, International1924, [175.0, -38.0, 113.0]),
    d("Chua Astro", 4224, International1924, [-134.0, 229.0, -29.0]),
    d("Corrego Alegre", 4225, International1924, [-206.0, 172.0, -6.0]),
    d("Djakarta (Batavia)", 4211, Bessel1841, [-377.0, 681.0, -50.0]),
    d("DOS 1968", 0, International1924, [230.0, -199.0, -752.0]),
    d("Easter Island 1967", 4719, International1924, [211.0, 147.0, 111.0]),
    d("Egypt", 4199, International1924, [-130.0, -117.0, -151.0]),
    d("European 1950", 4230, International1924, [-87.0, -98.0, -121.0]),
    d("European 1950 (Mean France)", 4230, International1924, [-87.0, -96.0, -120.0]),
    d("European 1950 (Spain adn Portugal)", 4230, International1924, [-84.0, -107.0, -120.0]),
    d("European 1979", 4668, International1924, [-86.0, -98.0, -119.0]),
    d("Finland Hayford", 0, International1924, [-78.0, -231.0, -97.0]),
    d("Gandajika Base", 4233, International1924, [-133.0, -321.0, 50.0]),
    d("Geodetic Datum 1949", 4272, International1924, [84.0, -22.0, -209.0]),
    d("Guam 1963", 4675, Clarke1866, [-100.0, -248.0, 259.0]),
    d("GUX 1 Astro", 0, International1924, [252.0, -209.0, -751.0]),
    d("Hartebeeshoek94", 4148, Wgs84, [0.0, 0.0, 0.0]),
    d("Hermannskogel", 4312, BesselNamibia, [653.0, -212.0, 449.0]),
    d("Hjorsey 1955", 4658, International1924, [-73.0, 46.0, -86.0]),
    d("Hong Kong 1963", 4739, International1924, [-156.0, -271.0, -189.0]),
    d("Hu-Tzu-Shan", 4236, International1924, [-634.0, -549.0, -201.0]),
    d("Indian Bangladesh", 4240, Everest1830, [289.0, 734.0, 257.0]),
    d("Indian Thailand", 4239, Everest1830, [214.0, 836.0, 303.0]),
    d("Israeli", 0, axes(6378300.789, 6356566.435), [-235.0, -85.0, 264.0]),
    d("Ireland 1965", 0, ModifiedAiry, [506.0, -122.0, 611.0]),
    d("ISTS 073 Astro 1969", 0, International1924, [208.0, -435.0, -229.0]),
    d("Johnston Island", 4725, International1924, [191.0, -77.0, -204.0]),
    d("Kandawala", 4244, Everest1830, [-97.0, 787.0, 86.0]),
    d("Kerguelen Island", 4698, International1924, [145.0, -187.0, 103.0]),
    d("Kertau 1948", 4245, axes(6377304.063, 6356103.038993155), [-11.0, 851.0, 5.0]),
    d("L.C. 5 Astro", 0, Clarke1866, [42.0, 124.0, 147.0]),
    d("Liberia 1964", 4251, Clarke1880, [-90.0, 40.0, 88.0]),
    d("Luson Mindanao", 0, Clarke1866, [-133.0, -79.0, -72.0]),
    d("Luson Philippines", 4253, Clarke1866, [-133.0, -77.0, -51.0]),
    d("Mahe 1971", 4256, Clarke1880, [41.0, -220.0, -134.0]),
    d("Marco Astro", 0, International1924, [-289.0, -124.0, 60.0]),
    d("Massawa", 4262, Bessel1841, [639.0, 405.0, 60.0]),
    d("Merchich", 4261, axes(6378249.2, 6356515.0), [31.0, 146.0, 47.0]),
    d("Midway Astro 1961", 4727, International1924, [912.0, -58.0, 1227.0]),
    d("Minna", 4263, Clarke1880, [-92.0, -93.0, 122.0]),
    d("NAD27 Alaska", 4267, Clarke1866, [-5.0, 135.0, 172.0]),
    d("NAD27 Bahamas", 4267, Clarke1866, [-4.0, 154.0, 178.0]),
    d("NAD27 Canada", 4267, Clarke1866, [-10.0, 158.0, 187.0]),
    d("NAD27 CanalZone", 4267, Clarke1866, [0.0, 125.0, 201.0]),
    d("NAD27 Carribean", 4267, Clarke1866, [-7.0, 152.0, 178.0]),
    d("NAD27 Central", 4267, Clarke1866, [0.0, 125.0, 194.0]),
    d("NAD27 CONUS", 4267, Clarke1866, [-8.0, 160.0, 176.0]),
    d("NAD27 Cuba", 4267, Clarke1866, [-9.0, 152.0, 178.0]),
    d("NAD27 Greenland", 4267, Clarke1866, [11.0, 114.0, 195.0]),
    d("NAD27 Mexico", 4267, Clarke1866, [-12.0, 130.0, 190.0]),
    d("NAD27 San Salvador", 4267, Clarke1866, [1.0, 140.0, 165.0]),
    d("NAD83", 4269, Grs80, [0.0, 0.0, 0.0]),
    d("Nahrwn Masirah IInd", 0, Clarke1880, [-247.0, -148.0, 369.0]),
    d("Nahrwn Saudi Arbia", 0, Clarke1880, [-231.0, -196.0, 482.0]),
    d("Nahrwn United Arab", 0, Clarke1880, [-249.0, -156.0, 381.0]),
    d("Naparima BWI", 4271, International1924, [-2.0, 374.0, 172.0]),
    d("NGO1948", 4273, axes(6377492.018, 6356173.508712696), [315.0, -217.0, 528.0]),
    d("NTF France", 4807, axes(6378249.2, 6356515.0), [-168.0, -60.0, 320.0]),
    d("Norsk", 0, axes(6377492.018, 6356173.508712696), [278.0, 93.0, 474.0]),
    d("Observatorio 1966", 4129, International1924, [-425.0, -169.0, 81.0]),
    d("Old Egyptian", 4229, Helmert1906, [-130.0, 110.0, -13.0]),
    d("Old Hawaiian", 4135, Clarke1866, [61.0, -285.0, -181.0]),
    d("Oman", 0, Clarke1880, [-346.0, -1.0, 224.0]),
    d("Old Srvy Grt Britn", 4277, Airy1830, [375.0, -111.0, 431.0]),
    d("Pico De Las Nieves", 4728, International1924, [-307.0, -92.0, 127.0]),
    d("Pitcairn Astro 1967", 4729, International1924, [185.0, 165.0, 42.0]),
    d("Potsdam Rauenberg DHDN", 4314, Bessel1841, [606.0, 23.0, 413.0]),
    d("Prov So Amrican 1956", 4248, International1924, [-288.0, 175.0, -376.0]),
    d("Prov So Chilean 1963", 0, International1924, [16.0, 196.0, 93.0]),
    d("Puerto Rico", 4139, Clarke1866, [11.0, 72.0, -101.0]),
    d("Pulkovo 1942 (1)", 4284, Krassowsky, [28.0, -130.0, -95.0]),
    d("Pulkovo 1942 (2)", 4284, Krassowsky, [28.0, -130.0, -95.0]),
    d("Qatar National", 4285, International1924, [-128.0, -283.0, 22.0]),
    d("Qornoq", 4287, International1924, [164.0, 138.0, -189.0]),
    d("Reunion", 4626, International1924, [94.0, -948.0, -1252.0]),
    d("Rijksdriehoeksmeting", 0, Bessel1841, [593.0, 26.0, 478.0]),
    d("Rome 1940", 0, International1924, [-255.0, -65.0, 9.0]),
    d("RT 90", 4124, Bessel1841, [498.0, -36.0, 568.0]),
    d("S42", 0, Krassowsky, [28.0, -121.0, -77.0]),
    d("Santo (DOS)", 4730, International1924, [170.0, 42.0, 84.0]),
    d("Sao Braz", 0, International1924, [-203.0, 141.0, 53.0]),
    d("Sapper Hill 1943", 4292, International1924, [-355.0, 16.0, 74.0]),
    d("Schwarzeck", 4293, BesselNamibia, [616.0, 97.0, -251.0]),
    d("South American 1969", 4618, AustralianNational, [-57.0, 1.0, -41.0]),
    d("South Asia", 0, ModifiedFischer1960, [7.0, -10.0, -26.0]),
    d("Southeast Base", 0, International1924, [-499.0, 249.0, 314.0]),
    d("Southwest Base", 0, International1924, [-104.0, 167.0, -38.0]),
    d("Timbalai 1948", 4298, Everest1830, [-689.0, 691.0, -46.0]),
    d("Tokyo", 4301, Bessel1841, [-128.0, 481.0, 664.0]),
    d("Tristan Astro 1968", 4734, International1924, [-632.0, 438.0, -609.0]),
    d("Viti Levu 1916", 4731, Clarke1880, [51.0, 391.0, -36.0]),
    d("Wake-Eniwetok 1960", 0, Hough, [101.0, 52.0, -39.0]),
    d("WGS 72", 4322, Wgs72, [0.0, 0.0, 5.0]),
    d("WGS 84", 4326, Wgs84, [0.0, 0.0, 0.0]),
    d("Yacare", 4309, International1924, [-155.0, 171.0, 37.0]),
    d("Zanderij", 4311, International1924, [-265.0, 120.0, -358.0]),
];
