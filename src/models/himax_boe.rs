use embedded_graphics_core::pixelcolor::Rgb888;
use embedded_hal::delay::DelayNs;

use crate::{
    dcs::{ExitSleepMode, InterfaceExt, SetDisplayOn},
    error::Error,
    interface::Interface,
    mode::{ModeDescriptor, Timing},
    models::Model,
    options::{DsiConfig, DsiPixel, ModeFlags},
    reset::ResetTiming,
    sequence::{self, Step},
};

/// Himax BOE 1200x2000 video mode panel.
///
/// Four-lane DSI, RGB888, driven by a Himax HX83102 controller. Brightness is
/// controlled over DCS with 12-bit values.
pub struct HimaxBoe;

/// Power mode tuning. Written once during configuration and again after
/// sleep-out, where it takes effect.
const POWER_MODE: &[u8] = &[
    0x00, 0xb0, 0x47, 0xd0, 0x00, 0x2c, 0x50, 0x2c, 0x00, 0x00, 0x00, 0x00, 0x15, 0x20, 0xd7, 0x00,
];

/// Vendor configuration sent after the reset pulse, before sleep-out.
///
/// `0xbd` selects the register page for the writes that follow it.
pub const INIT_SEQUENCE: &[Step] = &[
    // enable extended command set
    Step::write(0xb9, &[0x83, 0x10, 0x2e]),
    Step::write(0xe9, &[0xcd]),
    Step::write(0xbb, &[0x01]),
    Step::sleep_range_us(5000, 6000),
    Step::write(0xe9, &[0x00]),
    Step::write(0xd1, &[0x67, 0x0c, 0xff, 0x05]),
    Step::write(
        0xb1,
        &[
            0x10, 0xfa, 0xaf, 0xaf, 0x2b, 0x2b, 0xb2, 0x57, 0x4d, 0x36, 0x36, 0x36, 0x36, 0x22,
            0x21, 0x15, 0x00,
        ],
    ),
    Step::write(0xb2, POWER_MODE),
    Step::write(
        0xb4,
        &[
            0x70, 0x60, 0x01, 0x01, 0x80, 0x67, 0x00, 0x00, 0x01, 0x9b, 0x01, 0x58, 0x00, 0xff,
            0x00, 0xff,
        ],
    ),
    Step::write(0xbf, &[0xfc, 0x85, 0x80]),
    Step::write(0xd2, &[0x2b, 0x2b]),
    Step::write(
        0xd3,
        &[
            0x00, 0x00, 0x00, 0x00, 0x78, 0x04, 0x00, 0x04, 0x00, 0x27, 0x00, 0x64, 0x4f, 0x2d,
            0x2d, 0x00, 0x00, 0x32, 0x10, 0x27, 0x00, 0x27, 0x32, 0x10, 0x23, 0x00, 0x23, 0x32,
            0x18, 0x03, 0x08, 0x03, 0x00, 0x00, 0x20, 0x30, 0x01, 0x55, 0x21, 0x2e, 0x01, 0x55,
            0x0f,
        ],
    ),
    Step::sleep_range_us(5000, 6000),
    // gamma
    Step::write(
        0xe0,
        &[
            0x00, 0x06, 0x11, 0x19, 0x21, 0x3b, 0x53, 0x5a, 0x60, 0x5b, 0x74, 0x78, 0x7d, 0x8a,
            0x87, 0x8f, 0x98, 0xaa, 0xaa, 0x54, 0x5b, 0x66, 0x70, 0x00, 0x06, 0x11, 0x19, 0x21,
            0x3b, 0x53, 0x5a, 0x60, 0x5b, 0x74, 0x78, 0x7d, 0x8a, 0x87, 0x8f, 0x98, 0xaa, 0xaa,
            0x54, 0x5b, 0x66, 0x70,
        ],
    ),
    Step::sleep_range_us(5000, 6000),
    Step::write(0xbd, &[0x01]),
    Step::write(0xb1, &[0x01, 0x9b, 0x01, 0x31]),
    Step::write(
        0xcb,
        &[0xf4, 0x36, 0x12, 0x16, 0xc0, 0x28, 0x6c, 0x85, 0x3f, 0x04],
    ),
    Step::write(
        0xd3,
        &[0x01, 0x00, 0xbc, 0x00, 0x00, 0x11, 0x10, 0x00, 0x0e, 0x00, 0x01],
    ),
    Step::sleep_range_us(5000, 6000),
    Step::write(0xbd, &[0x02]),
    Step::write(0xb4, &[0x4e, 0x00, 0x33, 0x11, 0x33, 0x88]),
    Step::write(0xbf, &[0xf2, 0x00, 0x02]),
    Step::write(0xbd, &[0x00]),
    Step::write(
        0xc0,
        &[
            0x23, 0x23, 0x22, 0x11, 0xa2, 0x17, 0x00, 0x80, 0x00, 0x00, 0x08, 0x00, 0x63, 0x63,
        ],
    ),
    Step::write(0xc6, &[0xf9]),
    Step::write(0xc7, &[0x30]),
    Step::write(0xc8, &[0x00, 0x04, 0x04, 0x00, 0x00, 0x85, 0x43, 0xff]),
    Step::write(0xd0, &[0x07, 0x04, 0x05]),
    // GIP mapping
    Step::write(
        0xd5,
        &[
            0x18, 0x18, 0x18, 0x18, 0x1a, 0x1a, 0x1a, 0x1a, 0x1b, 0x1b, 0x1b, 0x1b, 0x24, 0x24,
            0x24, 0x24, 0x07, 0x06, 0x07, 0x06, 0x05, 0x04, 0x05, 0x04, 0x03, 0x02, 0x03, 0x02,
            0x01, 0x00, 0x01, 0x00, 0x21, 0x20, 0x21, 0x20, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18,
            0x18, 0x18,
        ],
    ),
    Step::sleep_range_us(5000, 6000),
    Step::write(
        0xe7,
        &[
            0x12, 0x13, 0x02, 0x02, 0x49, 0x49, 0x0e, 0x0e, 0x0f, 0x1a, 0x1d, 0x74, 0x28, 0x74,
            0x01, 0x07, 0x00, 0x00, 0x00, 0x00, 0x17, 0x00, 0x68,
        ],
    ),
    Step::write(0xbd, &[0x01]),
    Step::write(0xe7, &[0x02, 0x38, 0x01, 0x93, 0x0d, 0xda, 0x0e]),
    Step::write(0xbd, &[0x02]),
    Step::write(
        0xe7,
        &[
            0xff, 0x01, 0xff, 0x01, 0x00, 0x00, 0x22, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x81, 0x00, 0x02, 0x40,
        ],
    ),
    Step::write(0xbd, &[0x00]),
    Step::write(0xba, &[0x70, 0x03, 0xa8, 0x83, 0xf2, 0x80, 0xc0, 0x0d]),
    Step::write(0xbd, &[0x02]),
    Step::write(
        0xd8,
        &[
            0xff, 0xff, 0xff, 0xff, 0xf0, 0x00, 0xff, 0xff, 0xff, 0xff, 0xf0, 0x00,
        ],
    ),
    Step::write(0xbd, &[0x03]),
    Step::write(
        0xd8,
        &[
            0xaa, 0xaa, 0xaa, 0xaa, 0xa0, 0x00, 0xaa, 0xaa, 0xaa, 0xaa, 0xa0, 0x00, 0x55, 0x55,
            0x55, 0x55, 0x50, 0x00, 0x55, 0x55, 0x55, 0x55, 0x50, 0x00,
        ],
    ),
    Step::write(0xbd, &[0x00]),
    Step::write(0xe1, &[0x01, 0x06]),
    Step::write(0xcc, &[0x02]),
    Step::write(0xbd, &[0x03]),
    Step::write(0xb2, &[0x80]),
    Step::write(0xbd, &[0x00]),
    // brightness 0, backlight control on
    Step::write(0x51, &[0x00, 0x00]),
    Step::write(0x53, &[0x2c]),
    Step::write(0xc9, &[0x00, 0x0d, 0xf0, 0x00]),
];

/// Sent between sleep-out and display-on.
pub const POST_SLEEP_SEQUENCE: &[Step] = &[Step::write(0xb2, POWER_MODE)];

impl Model for HimaxBoe {
    type ColorFormat = Rgb888;

    const MODE: ModeDescriptor = ModeDescriptor::new(
        Timing::new(1200, 20, 8, 16),
        Timing::new(2000, 80, 8, 38),
        60,
    );

    const DSI_CONFIG: DsiConfig = DsiConfig {
        lanes: 4,
        format: <Self::ColorFormat as DsiPixel>::FORMAT,
        mode_flags: ModeFlags {
            video: true,
            clock_non_continuous: true,
            low_power: true,
        },
    };

    const RESET_TIMING: ResetTiming = ResetTiming {
        pre_release_ms: 20,
        assert_ms: 20,
        post_release_ms: 50,
    };

    fn power_on<DI, DELAY>(
        &mut self,
        di: &mut DI,
        delay: &mut DELAY,
    ) -> Result<(), Error<DI::Error>>
    where
        DI: Interface,
        DELAY: DelayNs,
    {
        sequence::run(di, delay, INIT_SEQUENCE)?;

        di.write_command(ExitSleepMode)
            .inspect_err(|e| log::debug!("Failed to exit sleep mode: {}", e))?;
        delay.delay_ms(60);

        sequence::run(di, delay, POST_SLEEP_SEQUENCE)?;

        di.write_command(SetDisplayOn)
            .inspect_err(|e| log::debug!("Failed to set display on: {}", e))?;
        delay.delay_ms(20);

        Ok(())
    }
}
