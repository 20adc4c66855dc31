/// WGSL shader for the deformable terrain: vertex colors, directional +
/// ambient lighting, exponential-squared fog toward the clear color.
pub const TERRAIN_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    // xyz: normalized sun direction, w: sun intensity
    sun: vec4<f32>,
    // rgb: ambient color, w: ambient intensity
    ambient: vec4<f32>,
    // rgb: fog/clear color, w: fog density
    fog: vec4<f32>,
    // xyz: camera position, w: surface opacity
    camera: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) color: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) color: vec3<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(vertex.position, 1.0);
    out.world_pos = vertex.position;
    out.world_normal = vertex.normal;
    out.color = vertex.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput, @builtin(front_facing) front_facing: bool) -> @location(0) vec4<f32> {
    var n = normalize(in.world_normal);
    if (!front_facing) {
        n = -n;
    }
    let diffuse = max(dot(n, normalize(uniforms.sun.xyz)), 0.0) * uniforms.sun.w;
    let lighting = uniforms.ambient.rgb * uniforms.ambient.w + vec3<f32>(diffuse);
    var color = in.color * lighting;

    let dist = distance(uniforms.camera.xyz, in.world_pos);
    let density = uniforms.fog.w;
    let fog_factor = clamp(1.0 - exp(-density * density * dist * dist), 0.0, 1.0);
    color = mix(color, uniforms.fog.rgb, fog_factor);

    return vec4<f32>(color, uniforms.camera.w);
}
"#;
