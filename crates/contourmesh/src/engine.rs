//! The per-redraw pipeline and the state it carries between frames.

use contourmesh_core::{
    AnimatedSegment, DVec2, DVec3, FieldAxis, GroupKey, GroupRegistry, HandleAllocator, HandleId,
    Layout, PositionBuffers, Result, Segment, SeriesSource, ValidationReport, VertexSet,
};
use contourmesh_mesh::{
    contour, gradient, ContourMesh, FixedTicks, MeshStrategy, MeshTriangle, TickSource,
    Triangulator,
};
use contourmesh_render::{
    ColorAxis, ColorMap, ColorMapRegistry, DrawCommand, Fill, Frame, GradientId,
    GradientIdAllocator, IdentityProjector, Projector, TrianglePath,
};

/// Renderer resources owned by one triangle position in the build order.
#[derive(Debug, Clone, Copy)]
struct TriangleSlot {
    shape: HandleId,
    gradient: Option<GradientId>,
}

/// A shaded triangle waiting for its group to be ordered.
struct ShadedTriangle {
    handle: HandleId,
    path: TrianglePath,
    fill: Fill,
}

/// Tessellates and shades contour series.
///
/// An engine holds the injected collaborators (projector, triangulator, tick
/// source, color map presets) and all state that must survive between redraws:
/// the depth group registry, triangle slots with their draw handles and
/// gradient ids, and the vertex position buffers used for animation. One engine
/// serves one series.
pub struct Engine {
    color_maps: ColorMapRegistry,
    projector: Box<dyn Projector>,
    triangulator: Option<Box<dyn Triangulator>>,
    ticks: Box<dyn TickSource>,
    groups: GroupRegistry,
    handles: HandleAllocator,
    gradient_ids: GradientIdAllocator,
    slots: Vec<TriangleSlot>,
    positions: PositionBuffers,
    report: ValidationReport,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine with an identity projector, no triangulator and no
    /// tick levels.
    pub fn new() -> Self {
        log::info!("contourmesh engine created");
        Self {
            color_maps: ColorMapRegistry::new(),
            projector: Box::new(IdentityProjector),
            triangulator: None,
            ticks: Box::new(FixedTicks::new()),
            groups: GroupRegistry::new(),
            handles: HandleAllocator::new(),
            gradient_ids: GradientIdAllocator::new(),
            slots: Vec::new(),
            positions: PositionBuffers::new(),
            report: ValidationReport::default(),
        }
    }

    /// Sets the projector used in pseudo-3D layouts.
    pub fn with_projector(mut self, projector: impl Projector + 'static) -> Self {
        self.projector = Box::new(projector);
        self
    }

    /// Replaces the projector, keeping all frame state.
    pub fn set_projector(&mut self, projector: impl Projector + 'static) {
        self.projector = Box::new(projector);
    }

    /// Sets the triangulator used when neither triangles nor a grid width are given.
    pub fn with_triangulator(mut self, triangulator: impl Triangulator + 'static) -> Self {
        self.triangulator = Some(Box::new(triangulator));
        self
    }

    /// Sets the source of contour levels.
    pub fn with_ticks(mut self, ticks: impl TickSource + 'static) -> Self {
        self.ticks = Box::new(ticks);
        self
    }

    /// Registers an additional color map preset.
    pub fn with_color_map(mut self, color_map: ColorMap) -> Self {
        self.color_maps.register(color_map);
        self
    }

    /// Returns the registered color map presets.
    pub fn color_maps(&self) -> &ColorMapRegistry {
        &self.color_maps
    }

    /// Returns the samples rejected by the last render.
    pub fn last_report(&self) -> &ValidationReport {
        &self.report
    }

    /// Returns the number of live triangle slots.
    pub fn num_slots(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of live depth groups.
    pub fn num_groups(&self) -> usize {
        self.groups.len()
    }

    /// Rebuilds the mesh of `series` and returns the frame to draw.
    ///
    /// Configuration errors are logged and yield an empty frame with the engine
    /// state untouched; use [`Engine::try_render`] to observe them.
    pub fn render(&mut self, series: &dyn SeriesSource) -> Frame {
        match self.try_render(series) {
            Ok(frame) => frame,
            Err(err) => {
                log::warn!("series '{}' not rendered: {err}", series.name());
                Frame::default()
            }
        }
    }

    /// Rebuilds the mesh of `series`, failing on unusable configuration such as
    /// a malformed strict triangle list.
    pub fn try_render(&mut self, series: &dyn SeriesSource) -> Result<Frame> {
        let options = series.options();
        let layout = options.layout();
        let strategy = MeshStrategy::from_options(options)?;

        let mut vertices = VertexSet::from_samples(series.samples(), options.is_3d);
        if options.color_axis.logarithmic {
            vertices.reject_non_positive(FieldAxis::Value);
        }
        self.report = vertices.report().clone();

        self.translate(series, &vertices);

        let color_axis = ColorAxis::from_options(
            &options.color_axis,
            vertices.extremes("value"),
            &self.color_maps,
        );

        let mesh = ContourMesh::build(
            &strategy,
            &vertices,
            &self.positions,
            layout,
            self.triangulator.as_deref(),
        );

        let mut edges = options.show_edges.then(|| mesh.edge_accountant());

        let levels: Vec<(&str, Vec<f64>)> = options
            .contours
            .iter()
            .filter_map(|spec| {
                let extent = vertices.extremes(&spec.attribute)?;
                Some((spec.attribute.as_str(), self.ticks.ticks(spec.axis, extent)))
            })
            .filter(|(_, ticks)| !ticks.is_empty())
            .collect();

        let mut frame = Frame::default();
        let mut shaded = Vec::with_capacity(mesh.len());

        self.groups.begin_frame();

        for triangle in mesh.triangles() {
            let Some(current) = triangle.current(&self.positions) else {
                continue;
            };
            let previous = triangle.previous(&self.positions).unwrap_or(current);
            let Some(values) = triangle.field(&vertices, "value") else {
                continue;
            };

            let mut fill = gradient::triangle_fill(values, current, &color_axis);
            let handle = self.bind_slot(shaded.len(), &mut fill, &mut frame);

            let boundary: Vec<AnimatedSegment> = match edges.as_mut() {
                Some(edges) => edges
                    .take_triangle(triangle.vertices)
                    .into_iter()
                    .filter_map(|(a, b)| self.animated_segment(a, b))
                    .collect(),
                None => Vec::new(),
            };

            let mut iso_lines = Vec::new();
            for (attribute, ticks) in &levels {
                if let Some(field) = triangle.field(&vertices, attribute) {
                    iso_lines.extend(contour::triangle_segments(field, current, previous, ticks));
                }
            }

            let group = self
                .groups
                .touch(group_key(triangle, layout), &mut self.handles);
            group.add_member(shaded.len(), triangle.depth);
            group.push_edges(boundary);
            group.push_contours(iso_lines);

            shaded.push(ShadedTriangle {
                handle,
                path: TrianglePath { previous, current },
                fill,
            });
        }

        self.release_slots_from(shaded.len(), &mut frame);
        let released_groups = self.groups.end_frame();
        frame.created.extend_from_slice(self.groups.created());
        frame.released.extend(released_groups);

        let depth_sorted = layout == Layout::Pseudo3d;
        let crisp_edges = options.crisp_edges;
        for group in self.groups.ordered(depth_sorted) {
            let z_index = if depth_sorted { group.z_index() } else { 0.0 };
            for &member in group.members() {
                let triangle = &shaded[member];
                frame.commands.push(DrawCommand::Triangle {
                    handle: triangle.handle,
                    group: group.handle(),
                    z_index,
                    path: triangle.path,
                    fill: triangle.fill.clone(),
                    crisp_edges,
                });
            }
            if !group.edges().is_empty() {
                frame.commands.push(DrawCommand::Edges {
                    group: group.handle(),
                    z_index,
                    segments: group.edges().to_vec(),
                    stroke: options.edge_style,
                });
            }
            if !group.contours().is_empty() {
                frame.commands.push(DrawCommand::Contours {
                    group: group.handle(),
                    z_index,
                    segments: group.contours().to_vec(),
                    stroke: options.contour_style,
                });
            }
        }

        frame.created.sort_unstable();
        frame.released.sort_unstable();
        self.positions.swap();

        log::debug!(
            "series '{}': {} samples, {} rejected, {} triangles, {} commands",
            series.name(),
            vertices.len(),
            self.report.len(),
            shaded.len(),
            frame.commands.len()
        );
        Ok(frame)
    }

    /// Releases every renderer resource the engine holds.
    ///
    /// The returned frame draws nothing and lists the released handles and
    /// gradients. Position history is dropped as well.
    pub fn clear(&mut self) -> Frame {
        let mut frame = Frame::default();
        self.release_slots_from(0, &mut frame);
        frame.released.extend(self.groups.clear());
        frame.released.sort_unstable();
        self.positions = PositionBuffers::new();
        frame
    }

    /// Maps every valid vertex to plot space and, in pseudo-3D, through the
    /// projector.
    fn translate(&mut self, series: &dyn SeriesSource, vertices: &VertexSet) {
        let options = series.options();
        let (x_axis, y_axis) = (series.x_axis(), series.y_axis());

        let (z_min, z_scale) = if options.is_3d {
            let (z_min, z_max) = vertices.extremes("z").unwrap_or((0.0, 1.0));
            let span = z_max - z_min;
            let span = if span == 0.0 { 1.0 } else { span };
            (z_min, options.depth / span)
        } else {
            (0.0, 0.0)
        };

        self.positions.begin_frame(vertices.len());
        for (index, vertex) in vertices.iter_valid() {
            let plot_x = x_axis.to_pixels(vertex.x);
            let plot_y = y_axis.to_pixels(vertex.y);

            let (flat, screen) = if options.is_3d {
                let plot_z = (vertex.z.unwrap_or(z_min) - z_min) * z_scale;
                let flat = DVec3::new(plot_x, plot_y, plot_z);
                (flat, self.projector.project(flat))
            } else {
                let flat = DVec3::new(plot_x, plot_y, 0.0);
                (flat, flat)
            };

            if screen.is_finite() {
                self.positions.set(index, flat, screen);
            }
        }
    }

    /// Binds the triangle at `index` to its slot, creating the slot if needed,
    /// and stamps a gradient fill with the slot's gradient id.
    fn bind_slot(&mut self, index: usize, fill: &mut Fill, frame: &mut Frame) -> HandleId {
        if index == self.slots.len() {
            let shape = self.handles.allocate();
            frame.created.push(shape);
            self.slots.push(TriangleSlot {
                shape,
                gradient: None,
            });
        }
        let slot = &mut self.slots[index];

        match fill {
            Fill::LinearGradient(gradient) => {
                let ids = &mut self.gradient_ids;
                gradient.id = Some(*slot.gradient.get_or_insert_with(|| ids.allocate()));
            }
            Fill::Solid(_) => {
                if let Some(id) = slot.gradient.take() {
                    frame.released_gradients.push(id);
                }
            }
        }
        slot.shape
    }

    /// Tears down slots at and after `len`.
    fn release_slots_from(&mut self, len: usize, frame: &mut Frame) {
        if len >= self.slots.len() {
            return;
        }
        for slot in self.slots.drain(len..) {
            frame.released.push(slot.shape);
            frame.released_gradients.extend(slot.gradient);
        }
        log::debug!("released triangle slots from {len}");
    }

    fn animated_segment(&self, a: u32, b: u32) -> Option<AnimatedSegment> {
        let point = |i: u32, previous: bool| -> Option<DVec2> {
            let position = if previous {
                self.positions.previous(i as usize)
            } else {
                self.positions.current(i as usize)
            };
            position.map(|p| p.truncate())
        };
        Some(AnimatedSegment::new(
            Segment::new(point(a, true)?, point(b, true)?),
            Segment::new(point(a, false)?, point(b, false)?),
        ))
    }
}

fn group_key(triangle: &MeshTriangle, layout: Layout) -> GroupKey {
    match layout {
        Layout::Flat => GroupKey::Surface,
        Layout::Pseudo3d => {
            let [a, b, c] = triangle.vertices;
            GroupKey::triangle(a, b, c)
        }
    }
}
