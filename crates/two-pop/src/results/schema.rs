//! Layout of a results directory.
//!
//! Every field lives in its own text file. The first line is a header
//! `# <field> <shape> schema v<N>`; after it each line holds one row of
//! space-separated values. One-dimensional fields hold one value per line.

use std::fmt;

/// Version written into every field header.
pub const SCHEMA_VERSION: u32 = 1;

/// Shape of a persisted field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldShape {
    /// One value per cell center
    Radial,
    /// One value per cell edge
    Edges,
    /// One value per snapshot
    Time,
    /// Snapshots × cell centers
    TimeRadial,
    /// One value per grain size
    Sizes,
    /// Cell centers × grain sizes
    RadialSizes,
}

impl FieldShape {
    pub fn is_matrix(self) -> bool {
        matches!(self, FieldShape::TimeRadial | FieldShape::RadialSizes)
    }
}

impl fmt::Display for FieldShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FieldShape::Radial => "radius",
            FieldShape::Edges => "edges",
            FieldShape::Time => "time",
            FieldShape::TimeRadial => "time*radius",
            FieldShape::Sizes => "size",
            FieldShape::RadialSizes => "radius*size",
        };
        f.write_str(label)
    }
}

/// Declaration of one persisted field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub file: &'static str,
    pub shape: FieldShape,
    /// Only present when a size distribution was reconstructed
    pub optional: bool,
}

const fn required(name: &'static str, file: &'static str, shape: FieldShape) -> FieldSpec {
    FieldSpec {
        name,
        file,
        shape,
        optional: false,
    }
}

pub const SIGMA_G: FieldSpec = required("sigma_g", "sigma_g.dat", FieldShape::TimeRadial);
pub const SIGMA_D: FieldSpec = required("sigma_d", "sigma_d.dat", FieldShape::TimeRadial);
pub const X: FieldSpec = required("x", "x.dat", FieldShape::Radial);
pub const XI: FieldSpec = required("xi", "xi.dat", FieldShape::Edges);
pub const T: FieldSpec = required("T", "T.dat", FieldShape::Radial);
pub const TIME: FieldSpec = required("time", "time.dat", FieldShape::Time);
pub const V_GAS: FieldSpec = required("v_gas", "v_gas.dat", FieldShape::TimeRadial);
pub const V_DUST: FieldSpec = required("v_dust", "v_dust.dat", FieldShape::TimeRadial);
pub const V_0: FieldSpec = required("v_0", "v_0.dat", FieldShape::TimeRadial);
pub const V_1: FieldSpec = required("v_1", "v_1.dat", FieldShape::TimeRadial);
pub const A_DR: FieldSpec = required("a_dr", "a_dr.dat", FieldShape::TimeRadial);
pub const A_FR: FieldSpec = required("a_fr", "a_fr.dat", FieldShape::TimeRadial);
pub const A_DF: FieldSpec = required("a_df", "a_df.dat", FieldShape::TimeRadial);
pub const A_T: FieldSpec = required("a_t", "a_t.dat", FieldShape::TimeRadial);

pub const A: FieldSpec = FieldSpec {
    name: "a",
    file: "a.dat",
    shape: FieldShape::Sizes,
    optional: true,
};

pub const SIGMA_D_A: FieldSpec = FieldSpec {
    name: "sigma_d_a",
    file: "sigma_d_a.dat",
    shape: FieldShape::RadialSizes,
    optional: true,
};

/// Every field of a results directory, in export order.
pub const FIELDS: &[FieldSpec] = &[
    SIGMA_G, SIGMA_D, X, XI, T, TIME, V_GAS, V_DUST, V_0, V_1, A_DR, A_FR, A_DF, A_T, A, SIGMA_D_A,
];

/// Time × radius fields, in export order.
pub const EVOLUTION_FIELDS: &[FieldSpec] = &[
    SIGMA_G, SIGMA_D, V_GAS, V_DUST, V_0, V_1, A_DR, A_FR, A_DF, A_T,
];

/// Look up a field by name.
pub fn field(name: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|spec| spec.name == name)
}

/// Header line written at the top of a field file.
pub fn header(spec: &FieldSpec) -> String {
    format!("# {} {} schema v{SCHEMA_VERSION}", spec.name, spec.shape)
}

/// Schema version announced by a header line, if any.
pub fn header_version(line: &str) -> Option<u32> {
    let (_, version) = line.rsplit_once("schema v")?;
    version.trim().parse().ok()
}
