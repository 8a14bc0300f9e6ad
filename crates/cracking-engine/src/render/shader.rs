use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::logging;
use crate::mesh::VertexLayout;

use super::ShaderError;

/// Where the pipeline's WGSL sources live.
#[derive(Debug, Clone)]
pub struct ShaderPaths {
    pub dir: PathBuf,
    pub vertex: PathBuf,
    pub fragment: PathBuf,
}

impl Default for ShaderPaths {
    /// The shaders bundled with this crate.
    fn default() -> Self {
        Self {
            dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/shaders")),
            vertex: PathBuf::from("basic.vert.wgsl"),
            fragment: PathBuf::from("basic.frag.wgsl"),
        }
    }
}

impl ShaderPaths {
    pub fn vertex_path(&self) -> PathBuf {
        self.dir.join(&self.vertex)
    }

    pub fn fragment_path(&self) -> PathBuf {
        self.dir.join(&self.fragment)
    }
}

/// Pipeline stage a source is compiled for.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// Entry point every source for this stage must define.
    pub const fn entry_point(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vs_main",
            ShaderStage::Fragment => "fs_main",
        }
    }

    fn naga(self) -> naga::ShaderStage {
        match self {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

/// WGSL text for one stage, passed on verbatim.
#[derive(Debug, Clone)]
pub struct ShaderSource {
    pub label: String,
    pub stage: ShaderStage,
    pub code: String,
}

impl ShaderSource {
    pub fn new(label: impl Into<String>, stage: ShaderStage, code: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            stage,
            code: code.into(),
        }
    }

    /// Reads a whole file as shader source.
    pub fn load(path: &Path, stage: ShaderStage) -> Result<Self, ShaderError> {
        let outcome =
            std::fs::read_to_string(path).map_err(|source| ShaderError::ResourceLoadFailed {
                path: path.to_path_buf(),
                source,
            });
        logging::report_outcome("read_file", &outcome, path.display());
        let code = outcome?;

        let label = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self::new(label, stage, code))
    }
}

/// A source that parsed and validated as WGSL.
#[derive(Debug)]
pub struct CompiledShader {
    source: ShaderSource,
    module: naga::Module,
}

impl CompiledShader {
    pub fn compile(source: ShaderSource) -> Result<Self, ShaderError> {
        let outcome = Self::parse_and_validate(source);
        logging::report_outcome("create_shader", &outcome, "shader created successfully");
        outcome
    }

    fn parse_and_validate(source: ShaderSource) -> Result<Self, ShaderError> {
        let module = naga::front::wgsl::parse_str(&source.code).map_err(|e| {
            ShaderError::ShaderCompileFailed {
                label: source.label.clone(),
                log: e.emit_to_string(&source.code),
            }
        })?;

        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        )
        .validate(&module)
        .map_err(|e| ShaderError::ShaderCompileFailed {
            label: source.label.clone(),
            log: e.to_string(),
        })?;

        Ok(Self { source, module })
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.source.label
    }

    #[inline]
    pub fn stage(&self) -> ShaderStage {
        self.source.stage
    }

    /// WGSL text, unchanged from the source.
    #[inline]
    pub fn code(&self) -> &str {
        &self.source.code
    }

    fn entry_point(&self) -> Result<&naga::EntryPoint, ShaderError> {
        let stage = self.stage();
        self.module
            .entry_points
            .iter()
            .find(|ep| ep.name == stage.entry_point() && ep.stage == stage.naga())
            .ok_or_else(|| ShaderError::ProgramLinkFailed {
                log: format!(
                    "`{}` has no {:?} entry point `{}`",
                    self.label(),
                    stage,
                    stage.entry_point()
                ),
            })
    }

    /// `@location`s read by the entry point.
    fn input_locations(&self, ep: &naga::EntryPoint) -> BTreeSet<u32> {
        let mut out = BTreeSet::new();
        for arg in &ep.function.arguments {
            collect_locations(&self.module, arg.ty, arg.binding.as_ref(), &mut out);
        }
        out
    }

    /// `@location`s written by the entry point.
    fn output_locations(&self, ep: &naga::EntryPoint) -> BTreeSet<u32> {
        let mut out = BTreeSet::new();
        if let Some(result) = &ep.function.result {
            collect_locations(&self.module, result.ty, result.binding.as_ref(), &mut out);
        }
        out
    }
}

fn collect_locations(
    module: &naga::Module,
    ty: naga::Handle<naga::Type>,
    binding: Option<&naga::Binding>,
    out: &mut BTreeSet<u32>,
) {
    match binding {
        Some(naga::Binding::Location { location, .. }) => {
            out.insert(*location);
        }
        Some(_) => {}
        None => {
            if let naga::TypeInner::Struct { members, .. } = &module.types[ty].inner {
                for member in members {
                    collect_locations(module, member.ty, member.binding.as_ref(), out);
                }
            }
        }
    }
}

/// Checks that two compiled stages form a program over `layout`.
///
/// - the vertex source has `@vertex fn vs_main`, the fragment source `@fragment fn fs_main`
/// - every vertex input location is fed by `layout`
/// - every fragment input location is written by the vertex stage
pub fn link(
    vertex: &CompiledShader,
    fragment: &CompiledShader,
    layout: &VertexLayout,
) -> Result<(), ShaderError> {
    let outcome = link_stages(vertex, fragment, layout);
    logging::report_outcome("create_program", &outcome, "program created successfully");
    outcome
}

fn link_stages(
    vertex: &CompiledShader,
    fragment: &CompiledShader,
    layout: &VertexLayout,
) -> Result<(), ShaderError> {
    for (shader, expected) in [(vertex, ShaderStage::Vertex), (fragment, ShaderStage::Fragment)] {
        if shader.stage() != expected {
            return Err(link_error(format!(
                "`{}` is a {:?} shader, expected {:?}",
                shader.label(),
                shader.stage(),
                expected
            )));
        }
    }

    let vs = vertex.entry_point()?;
    let fs = fragment.entry_point()?;

    let fed: BTreeSet<u32> = layout.locations().collect();
    let vertex_inputs = vertex.input_locations(vs);
    if let Some(location) = vertex_inputs.difference(&fed).next() {
        return Err(link_error(format!(
            "vertex input @location({location}) is not provided by the vertex layout"
        )));
    }

    let written = vertex.output_locations(vs);
    let fragment_inputs = fragment.input_locations(fs);
    if let Some(location) = fragment_inputs.difference(&written).next() {
        return Err(link_error(format!(
            "fragment input @location({location}) is not written by `{}`",
            vertex.label()
        )));
    }

    Ok(())
}

fn link_error(log: String) -> ShaderError {
    ShaderError::ProgramLinkFailed { log }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERT: &str = include_str!("../../shaders/basic.vert.wgsl");
    const FRAG: &str = include_str!("../../shaders/basic.frag.wgsl");

    fn compile(stage: ShaderStage, code: &str) -> CompiledShader {
        CompiledShader::compile(ShaderSource::new("test", stage, code)).unwrap()
    }

    fn link_err(vertex: &str, fragment: &str) -> String {
        let vs = compile(ShaderStage::Vertex, vertex);
        let fs = compile(ShaderStage::Fragment, fragment);
        match link(&vs, &fs, &VertexLayout::interleaved()) {
            Err(ShaderError::ProgramLinkFailed { log }) => log,
            other => panic!("expected link failure, got {other:?}"),
        }
    }

    // ── loading ───────────────────────────────────────────────────────────

    #[test]
    fn bundled_sources_load_from_default_paths() {
        let paths = ShaderPaths::default();
        let vs = ShaderSource::load(&paths.vertex_path(), ShaderStage::Vertex).unwrap();
        let fs = ShaderSource::load(&paths.fragment_path(), ShaderStage::Fragment).unwrap();
        assert_eq!(vs.label, "basic.vert.wgsl");
        assert_eq!(vs.code, VERT);
        assert_eq!(fs.code, FRAG);
    }

    #[test]
    fn missing_file_is_resource_load_failure() {
        let path = Path::new("definitely/not/here.wgsl");
        let err = ShaderSource::load(path, ShaderStage::Vertex).unwrap_err();
        match err {
            ShaderError::ResourceLoadFailed { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected {other:?}"),
        }
    }

    // ── compile ───────────────────────────────────────────────────────────

    #[test]
    fn bundled_shaders_compile_and_link() {
        let vs = compile(ShaderStage::Vertex, VERT);
        let fs = compile(ShaderStage::Fragment, FRAG);
        assert_eq!(vs.code(), VERT);
        link(&vs, &fs, &VertexLayout::interleaved()).unwrap();
    }

    #[test]
    fn syntax_error_is_compile_failure() {
        let err = CompiledShader::compile(ShaderSource::new(
            "broken.wgsl",
            ShaderStage::Vertex,
            "@vertex fn vs_main( -> {",
        ))
        .unwrap_err();
        match err {
            ShaderError::ShaderCompileFailed { label, log } => {
                assert_eq!(label, "broken.wgsl");
                assert!(!log.is_empty());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn type_error_is_compile_failure() {
        let src = "@fragment fn fs_main() -> @location(0) vec4<f32> { return 1.0; }";
        let err = CompiledShader::compile(ShaderSource::new("t", ShaderStage::Fragment, src));
        assert!(matches!(err, Err(ShaderError::ShaderCompileFailed { .. })));
    }

    // ── link ──────────────────────────────────────────────────────────────

    #[test]
    fn missing_entry_point_fails_link() {
        let renamed = VERT.replace("vs_main", "main");
        let log = link_err(&renamed, FRAG);
        assert!(log.contains("vs_main"), "{log}");
    }

    #[test]
    fn swapped_stages_fail_link() {
        let vs = compile(ShaderStage::Vertex, VERT);
        let fs = compile(ShaderStage::Fragment, FRAG);
        assert!(link(&fs, &vs, &VertexLayout::interleaved()).is_err());
    }

    #[test]
    fn fragment_input_must_be_written_by_vertex_stage() {
        let frag = r#"
            struct FragmentInput {
                @location(0) color: vec3<f32>,
                @location(3) extra: f32,
            };
            @fragment
            fn fs_main(f: FragmentInput) -> @location(0) vec4<f32> {
                return vec4<f32>(f.color * f.extra, 1.0);
            }
        "#;
        let log = link_err(VERT, frag);
        assert!(log.contains("@location(3)"), "{log}");
    }

    #[test]
    fn vertex_input_must_be_in_layout() {
        let vert = r#"
            @vertex
            fn vs_main(@location(0) p: vec3<f32>, @location(5) uv: vec2<f32>) -> @builtin(position) vec4<f32> {
                return vec4<f32>(p.xy + uv, p.z, 1.0);
            }
        "#;
        let frag = "@fragment fn fs_main() -> @location(0) vec4<f32> { return vec4<f32>(1.0); }";
        let log = link_err(vert, frag);
        assert!(log.contains("@location(5)"), "{log}");
    }
}
