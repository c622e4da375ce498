//! # Label Composition Pipeline
//!
//! Ties the engine together, one dataset at a time: resolve the column
//! schema once, fail fast if mandatory columns are missing, then compose
//! every row into a [`LabelRecord`] — canonical field values, the QR
//! payload, and the cell grid the rendering backend consumes.
//!
//! Rows are independent, so composition fans out across a rayon pool;
//! output order always equals input row order. Row-level problems (a bad
//! logo, a failed QR encode) degrade that row's cell and never drop the
//! record.

pub mod location;
pub mod payload;

pub use location::LocationSegments;

use chrono::Local;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::EtiquetaError;
use crate::layout::compose::{self, ImageHandle, LabelContent, LabelGrid};
use crate::layout::config::LayoutConfig;
use crate::layout::fit::{self, FitResult};
use crate::layout::measure::GlyphMetrics;
use crate::schema::{self, AliasTable, CanonicalField, ResolvedSchema};
use crate::source::TableSource;

/// QR encoding collaborator: payload text in, raster handle out.
///
/// The engine never inspects the raster beyond its dimensions.
pub trait QrEncoder: Sync {
    fn encode(&self, payload: &str) -> Result<ImageHandle, EtiquetaError>;
}

/// Canonical field values for one row. Optional fields normalize to empty
/// strings; mandatory columns are guaranteed present at the dataset level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValues {
    pub assembly: String,
    pub part_number: String,
    pub description: String,
    pub quantity: String,
    pub part_type: String,
    pub line_location: String,
}

impl FieldValues {
    /// Extract a row's values through the resolved schema. Unresolved
    /// columns and missing cells read as empty strings.
    pub fn extract(source: &dyn TableSource, schema: &ResolvedSchema, row: usize) -> Self {
        let get = |field: CanonicalField| -> String {
            schema
                .column(field)
                .and_then(|column| source.cell(row, column))
                .map(str::trim)
                .unwrap_or("")
                .to_string()
        };
        Self {
            assembly: get(CanonicalField::Assembly),
            part_number: get(CanonicalField::PartNumber),
            description: get(CanonicalField::Description),
            quantity: get(CanonicalField::QuantityPerUnit),
            part_type: get(CanonicalField::Type),
            line_location: get(CanonicalField::LineLocation),
        }
    }

    /// Values paired with their fields, in payload order.
    pub fn in_payload_order(&self) -> [(CanonicalField, &str); 6] {
        [
            (CanonicalField::Assembly, self.assembly.as_str()),
            (CanonicalField::PartNumber, self.part_number.as_str()),
            (CanonicalField::Description, self.description.as_str()),
            (CanonicalField::QuantityPerUnit, self.quantity.as_str()),
            (CanonicalField::Type, self.part_type.as_str()),
            (CanonicalField::LineLocation, self.line_location.as_str()),
        ]
    }
}

/// One composed label, ready for the rendering backend. Created per input
/// row and not persisted by the engine.
#[derive(Debug, Clone)]
pub struct LabelRecord {
    /// Zero-based input row index.
    pub index: usize,
    pub fields: FieldValues,
    /// The flat text encoded into the QR image.
    pub payload: String,
    pub grid: LabelGrid,
}

/// Dataset-to-labels composer.
///
/// Holds the validated [`LayoutConfig`], the glyph metrics supplied by the
/// rendering backend, and the optional dataset-wide logo. All state is
/// read-only during composition.
#[derive(Debug)]
pub struct Composer<M> {
    config: LayoutConfig,
    metrics: M,
    aliases: AliasTable,
    logo: Option<(FitResult, ImageHandle)>,
}

impl<M: GlyphMetrics + Sync> Composer<M> {
    /// Create a composer. Fails if the config's ratios or dimensions are
    /// inconsistent — bad geometry surfaces here, not mid-render.
    pub fn new(config: LayoutConfig, metrics: M) -> Result<Self, EtiquetaError> {
        config.validate()?;
        Ok(Self {
            config,
            metrics,
            aliases: AliasTable::builtin(),
            logo: None,
        })
    }

    /// Attach a logo used on every label of the dataset.
    ///
    /// The raster is fitted into the identity group's logo cell (shrunk by
    /// the configured padding factor) preserving aspect ratio. Fails with
    /// [`EtiquetaError::Image`] for degenerate rasters, leaving the
    /// composer logo-free; callers typically warn and continue.
    pub fn set_logo(&mut self, handle: ImageHandle) -> Result<(), EtiquetaError> {
        let (box_w, box_h) = self.config.logo_box();
        let pad = self.config.logo_padding;
        let (w, h) = handle.dimensions();
        let fit = fit::fit(w, h, box_w * pad, box_h * pad, self.config.dpi)?;
        debug!(
            source_w = w,
            source_h = h,
            width_cm = fit.width_cm,
            height_cm = fit.height_cm,
            "fitted logo"
        );
        self.logo = Some((fit, handle));
        Ok(())
    }

    /// The layout configuration in use.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Resolve `source`'s columns against the built-in alias table.
    pub fn resolve_schema(&self, source: &dyn TableSource) -> ResolvedSchema {
        schema::resolve(source.column_names(), &self.aliases)
    }

    /// Compose every row of a dataset, dated today.
    pub fn compose_dataset<S>(
        &self,
        source: &S,
        qr: Option<&dyn QrEncoder>,
    ) -> Result<Vec<LabelRecord>, EtiquetaError>
    where
        S: TableSource + Sync,
    {
        let today = Local::now().format("%d-%m-%Y").to_string();
        self.compose_dataset_dated(source, qr, &today)
    }

    /// Compose every row of a dataset with an explicit date string.
    ///
    /// Missing mandatory columns abort the whole dataset before any row is
    /// composed. Output order equals input row order.
    pub fn compose_dataset_dated<S>(
        &self,
        source: &S,
        qr: Option<&dyn QrEncoder>,
        date: &str,
    ) -> Result<Vec<LabelRecord>, EtiquetaError>
    where
        S: TableSource + Sync,
    {
        let schema = self.resolve_schema(source);
        let missing = schema.missing_mandatory();
        if !missing.is_empty() {
            return Err(EtiquetaError::Schema { missing });
        }

        debug!(rows = source.row_count(), "composing dataset");
        let records: Vec<LabelRecord> = (0..source.row_count())
            .into_par_iter()
            .map(|index| self.compose_row(source, &schema, index, qr, date))
            .collect();
        Ok(records)
    }

    fn compose_row(
        &self,
        source: &dyn TableSource,
        schema: &ResolvedSchema,
        index: usize,
        qr: Option<&dyn QrEncoder>,
        date: &str,
    ) -> LabelRecord {
        let fields = FieldValues::extract(source, schema, index);
        let segments = LocationSegments::parse(&fields.line_location);
        let payload = payload::build(&fields, date);
        let qr_image = qr.and_then(|encoder| self.encode_qr(encoder, &payload, index));

        let content = LabelContent {
            assembly: &fields.assembly,
            part_number: &fields.part_number,
            description: &fields.description,
            quantity: &fields.quantity,
            part_type: &fields.part_type,
            date,
            location: segments.as_strs(),
            logo: self.logo.clone(),
            qr: qr_image,
        };
        let grid = compose::compose(&self.config, &self.metrics, &content);

        LabelRecord {
            index,
            fields,
            payload,
            grid,
        }
    }

    /// Encode and fit the QR raster for one row. Failures degrade to the
    /// composer's text placeholder rather than dropping the record.
    fn encode_qr(
        &self,
        encoder: &dyn QrEncoder,
        payload: &str,
        index: usize,
    ) -> Option<(FitResult, ImageHandle)> {
        let handle = match encoder.encode(payload) {
            Ok(handle) => handle,
            Err(error) => {
                warn!(row = index, %error, "QR encoding failed, using placeholder");
                return None;
            }
        };
        let (w, h) = handle.dimensions();
        match fit::fit(w, h, self.config.qr_size_cm, self.config.qr_size_cm, self.config.dpi) {
            Ok(fit) => Some((fit, handle)),
            Err(error) => {
                warn!(row = index, %error, "QR raster unusable, using placeholder");
                None
            }
        }
    }
}
