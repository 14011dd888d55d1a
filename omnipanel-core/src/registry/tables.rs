//! Per-family device tables
//!
//! Order matches the order devices are listed to callers.

use super::{AltInit, DeviceDescriptor, Family, Mode};

const BW: &[Mode] = &[Mode::Bw];
const BW_RED: &[Mode] = &[Mode::Bw, Mode::Red];
const BW_YELLOW: &[Mode] = &[Mode::Bw, Mode::Yellow];
const BW_GRAY4: &[Mode] = &[Mode::Bw, Mode::Gray4];
const BW_COLOR: &[Mode] = &[Mode::Bw, Mode::Color];

const fn bw(model: &'static str, alt_init: Option<AltInit>) -> DeviceDescriptor {
    DeviceDescriptor {
        model,
        driver: model,
        family: Family::Bw,
        modes: BW,
        alt_init,
    }
}

const fn red(model: &'static str, driver: &'static str) -> DeviceDescriptor {
    DeviceDescriptor {
        model,
        driver,
        family: Family::TriColor,
        modes: BW_RED,
        alt_init: None,
    }
}

const fn yellow(model: &'static str, driver: &'static str) -> DeviceDescriptor {
    DeviceDescriptor {
        model,
        driver,
        family: Family::TriColor,
        modes: BW_YELLOW,
        alt_init: None,
    }
}

const fn gray(model: &'static str, alt_init: Option<AltInit>) -> DeviceDescriptor {
    DeviceDescriptor {
        model,
        driver: model,
        family: Family::Grayscale,
        modes: BW_GRAY4,
        alt_init,
    }
}

const fn multicolor(model: &'static str) -> DeviceDescriptor {
    DeviceDescriptor {
        model,
        driver: model,
        family: Family::MultiColor,
        modes: BW_COLOR,
        alt_init: None,
    }
}

const LUT: Option<AltInit> = Some(AltInit::LutFullUpdate);
const FULL_UPDATE: Option<AltInit> = Some(AltInit::ModeParam(0));

/// Black/white panels
pub static BW_DEVICES: &[DeviceDescriptor] = &[
    bw("epd2in9", LUT),
    bw("epd2in13", LUT),
    bw("epd1in54", LUT),
    bw("epd2in66", FULL_UPDATE),
    bw("epd2in13_V2", FULL_UPDATE),
    bw("epd1in54_V2", None),
    bw("epd2in13d", None),
    bw("epd2in9_V2", None),
    bw("epd2in9d", None),
    bw("epd5in83", None),
    bw("epd5in83_V2", None),
    bw("epd7in5", None),
    bw("epd7in5_HD", None),
    bw("epd7in5_V2", None),
];

/// Black/white/accent panels
pub static TRICOLOR_DEVICES: &[DeviceDescriptor] = &[
    red("epd1in54b", "epd1in54b"),
    red("epd1in54b_V2", "epd1in54b_V2"),
    yellow("epd1in54c", "epd1in54c"),
    red("epd2in13b", "epd2in13bc"),
    red("epd2in13b_V3", "epd2in13b_V3"),
    yellow("epd2in13c", "epd2in13bc"),
    red("epd2in66b", "epd2in66b"),
    red("epd2in7b", "epd2in7b"),
    red("epd2in7b_V2", "epd2in7b_V2"),
    red("epd2in9b", "epd2in9bc"),
    red("epd2in9b_V3", "epd2in9b_V3"),
    yellow("epd2in9c", "epd2in9bc"),
    red("epd4in2b", "epd4in2bc"),
    yellow("epd4in2c", "epd4in2bc"),
    red("epd4in2b_V2", "epd4in2b_V2"),
    red("epd5in83b", "epd5in83bc"),
    yellow("epd5in83c", "epd5in83bc"),
    red("epd5in83b_V2", "epd5in83b_V2"),
    red("epd7in5b", "epd7in5bc"),
    yellow("epd7in5c", "epd7in5bc"),
    red("epd7in5b_V2", "epd7in5b_V2"),
    red("epd7in5b_HD", "epd7in5b_HD"),
];

/// 4 level grayscale panels
pub static GRAYSCALE_DEVICES: &[DeviceDescriptor] = &[
    gray("epd2in7", None),
    gray("epd3in7", Some(AltInit::GrayModeNumber { gray4: 0, bw: 1 })),
    gray("epd4in2", None),
];

/// 7 color panels
pub static MULTICOLOR_DEVICES: &[DeviceDescriptor] =
    &[multicolor("epd5in65f"), multicolor("epd4in01f")];

/// The 1.02 inch panel
pub static EPD1IN02_DEVICES: &[DeviceDescriptor] = &[DeviceDescriptor {
    model: "epd1in02",
    driver: "epd1in02",
    family: Family::Epd1in02,
    modes: BW,
    alt_init: None,
}];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_sizes() {
        assert_eq!(BW_DEVICES.len(), 14);
        assert_eq!(TRICOLOR_DEVICES.len(), 22);
        assert_eq!(GRAYSCALE_DEVICES.len(), 3);
        assert_eq!(MULTICOLOR_DEVICES.len(), 2);
        assert_eq!(EPD1IN02_DEVICES.len(), 1);
    }

    #[test]
    fn test_alt_init_only_where_needed() {
        let lut: alloc::vec::Vec<_> = BW_DEVICES
            .iter()
            .filter(|d| d.alt_init == LUT)
            .map(|d| d.model)
            .collect();
        assert_eq!(lut, ["epd2in9", "epd2in13", "epd1in54"]);

        assert!(TRICOLOR_DEVICES.iter().all(|d| d.alt_init.is_none()));
        assert_eq!(
            GRAYSCALE_DEVICES[1].alt_init,
            Some(AltInit::GrayModeNumber { gray4: 0, bw: 1 })
        );
    }

    #[test]
    fn test_tricolor_accent_modes() {
        for device in TRICOLOR_DEVICES {
            assert_eq!(device.modes.len(), 2);
            assert_eq!(device.modes[0], Mode::Bw);
            assert!(device.modes[1].accent().is_some());
        }
    }
}
