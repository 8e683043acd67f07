//! [super::Panel] builder module

use embedded_hal::digital::{self, OutputPin};

use crate::{
    backlight::BacklightProperties,
    interface::Interface,
    models::Model,
    options::{DsiConfig, DsiPixel, PanelOptions, ResetPolarity},
    reset::ResetLine,
    Panel, PowerState,
};

/// Builder for [Panel] instances.
///
/// Attaching needs a reset pin; the panel cannot be brought to a known state
/// without one.
pub struct Builder<DI, MODEL, RST>
where
    DI: Interface,
    MODEL: Model,
{
    di: DI,
    model: MODEL,
    rst: Option<RST>,
    options: PanelOptions,
}

impl<DI, MODEL> Builder<DI, MODEL, NoResetPin>
where
    DI: Interface,
    MODEL: Model,
{
    #[must_use]
    pub fn new(model: MODEL, di: DI) -> Self {
        Self {
            di,
            model,
            rst: None,
            options: PanelOptions::for_model::<MODEL>(),
        }
    }
}

impl<DI, MODEL, RST> Builder<DI, MODEL, RST>
where
    DI: Interface,
    MODEL: Model,
    RST: OutputPin,
{
    #[must_use]
    pub fn reset_polarity(mut self, polarity: ResetPolarity) -> Self {
        self.options.reset_polarity = polarity;
        self
    }
    #[must_use]
    pub fn initial_brightness(mut self, brightness: u16) -> Self {
        self.options.initial_brightness = brightness;
        self
    }
    #[must_use]
    pub fn dsi_config(mut self, config: DsiConfig) -> Self {
        self.options.dsi = config;
        self
    }

    #[must_use]
    pub fn reset_pin<RST2: OutputPin>(self, rst: RST2) -> Builder<DI, MODEL, RST2> {
        Builder {
            di: self.di,
            model: self.model,
            rst: Some(rst),
            options: self.options,
        }
    }

    /// Attaches the panel to the bus host.
    ///
    /// Holds the panel in reset, applies the DSI configuration and attaches.
    /// No commands are sent; call [Panel::prepare] to power the panel on.
    pub fn attach(mut self) -> Result<Panel<DI, MODEL, RST>, AttachError<DI::Error>> {
        if !MODEL::MODE.is_valid() {
            return Err(AttachError::InvalidConfiguration(
                ConfigurationError::InvalidMode,
            ));
        }

        let backlight = BacklightProperties {
            brightness: self.options.initial_brightness,
            ..MODEL::BACKLIGHT
        };
        if !backlight.is_valid() {
            return Err(AttachError::InvalidConfiguration(
                ConfigurationError::InvalidBacklight,
            ));
        }

        if !self.options.dsi.is_valid() {
            return Err(AttachError::InvalidConfiguration(
                ConfigurationError::InvalidLaneCount,
            ));
        }

        if self.options.dsi.format != <MODEL::ColorFormat as DsiPixel>::FORMAT {
            return Err(AttachError::InvalidConfiguration(
                ConfigurationError::PixelFormatMismatch,
            ));
        }

        let Some(rst) = self.rst else {
            return Err(AttachError::MissingResetPin);
        };
        let mut rst = ResetLine::new(rst, self.options.reset_polarity);
        rst.assert();

        self.di
            .attach(&self.options.dsi)
            .inspect_err(|e| log::error!("Failed to attach to DSI host: {:?}", e))
            .map_err(AttachError::Interface)?;

        log::debug!("attached {}", MODEL::MODE);

        Ok(Panel {
            di: self.di,
            model: self.model,
            rst,
            backlight,
            state: PowerState::Unprepared,
        })
    }
}

/// Error returned by [Builder::attach].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachError<DIError> {
    /// The host rejected the device.
    Interface(DIError),
    /// No reset pin was supplied.
    MissingResetPin,
    /// The model or builder settings are inconsistent.
    InvalidConfiguration(ConfigurationError),
}

impl<DIError: core::fmt::Debug> core::fmt::Display for AttachError<DIError> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AttachError::Interface(e) => write!(f, "failed to attach to DSI host: {e:?}"),
            AttachError::MissingResetPin => write!(f, "reset pin is required"),
            AttachError::InvalidConfiguration(c) => write!(f, "invalid configuration: {c:?}"),
        }
    }
}

impl<DIError: core::fmt::Debug> core::error::Error for AttachError<DIError> {}

#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A mode timing is zero or the pixel clock does not match the timings.
    InvalidMode,
    /// Initial brightness above the maximum, or maximum above 4095.
    InvalidBacklight,
    /// DSI lane count outside 1 to 4.
    InvalidLaneCount,
    /// DSI pixel format differs from the model's color format.
    PixelFormatMismatch,
}

pub enum NoResetPin {}
impl digital::OutputPin for NoResetPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
impl digital::ErrorType for NoResetPin {
    type Error = core::convert::Infallible;
}
