use proptest::prelude::*;
use sillycraft_blocks::{Block, BlockId, BlockRegistry, Hardness, LinearColor};
use sillycraft_chunk::{CHUNK_SIZE, CHUNK_SIZE_3D, ChunkBuf, ChunkCoord, delinearize, flat_index};
use sillycraft_mesh_cpu::{ChunkMesher, Face, MeshBuild};

const PALETTE: [(BlockId, LinearColor); 3] = [
    (1, LinearColor::rgb(0.5, 0.5, 0.5)),
    (2, LinearColor::rgb(0.45, 0.3, 0.2)),
    (3, LinearColor::rgb(0.1, 0.6, 0.1)),
];

fn registry() -> BlockRegistry {
    let mut reg = BlockRegistry::new();
    for (i, (id, color)) in PALETTE.into_iter().enumerate() {
        reg.register(Block::new(format!("b{i}"), id, Hardness::Hard, color, 0, 0, 0))
            .unwrap();
    }
    reg
}

fn id_at(chunk: &ChunkBuf, x: i32, y: i32, z: i32) -> BlockId {
    let n = CHUNK_SIZE as i32;
    if (0..n).contains(&x) && (0..n).contains(&y) && (0..n).contains(&z) {
        chunk.get_local(x as usize, y as usize, z as usize)
    } else {
        0
    }
}

fn owner_of(mesh: &MeshBuild, q: usize) -> BlockId {
    let c = mesh.quad_color(q);
    PALETTE
        .iter()
        .find(|(_, col)| col.to_array() == c)
        .map(|(id, _)| *id)
        .unwrap()
}

// Faces of solid cells whose neighbor holds a different block (or lies outside).
fn exposed_faces(chunk: &ChunkBuf) -> usize {
    let mut n = 0;
    for i in 0..CHUNK_SIZE_3D {
        let (x, y, z) = delinearize(i);
        let id = chunk.blocks[i];
        if id == 0 {
            continue;
        }
        for f in Face::ALL {
            let d = f.delta();
            if id_at(chunk, x as i32 + d.x, y as i32 + d.y, z as i32 + d.z) != id {
                n += 1;
            }
        }
    }
    n
}

fn sparse_chunk() -> impl Strategy<Value = ChunkBuf> {
    prop::collection::vec(
        prop_oneof![6 => Just(0u16), 3 => Just(1u16), 2 => Just(2u16), 1 => Just(3u16)],
        CHUNK_SIZE_3D,
    )
    .prop_map(|blocks| ChunkBuf::from_blocks(ChunkCoord::default(), blocks, 0))
}

fn boxes_chunk() -> impl Strategy<Value = ChunkBuf> {
    let coord = 0..CHUNK_SIZE;
    prop::collection::vec(
        (
            (coord.clone(), coord.clone(), coord.clone()),
            (1usize..6, 1usize..6, 1usize..6),
            1u16..=3,
        ),
        1..6,
    )
    .prop_map(|boxes| {
        let mut chunk = ChunkBuf::filled(ChunkCoord::default(), 0);
        let last = CHUNK_SIZE - 1;
        for ((x, y, z), (w, h, d), id) in boxes {
            let max = ((x + w - 1).min(last), (y + h - 1).min(last), (z + d - 1).min(last));
            chunk.fill_box((x, y, z), max, id);
        }
        chunk
    })
}

fn check_mesh(chunk: &ChunkBuf) -> Result<(), TestCaseError> {
    let reg = registry();
    let mesh = ChunkMesher::new(&reg).with_scale(1.0).build(chunk).unwrap();

    // Merged quads tile exactly the exposed unit faces.
    let mut area = 0.0f64;
    for q in 0..mesh.quad_count() {
        let [v1, v2, _, v4] = mesh.quad(q);
        area += f64::from((v2 - v1).cross(v4 - v1).length());
    }
    prop_assert_eq!(area.round() as usize, exposed_faces(chunk));

    for q in 0..mesh.quad_count() {
        let n = (q * 4) as u32;
        prop_assert_eq!(&mesh.idx[q * 6..q * 6 + 6], &[n, n + 1, n + 2, n + 2, n + 3, n][..]);

        // Walk every unit cell the quad covers and step half a cell against and
        // along the outward direction: something solid lies behind, a different
        // block lies in front. Greedy merges may span blocks, so the quad's color
        // only has to belong to one of the cells behind it.
        let [v1, v2, v3, v4] = mesh.quad(q);
        let outward = (v2 - v1).cross(v3 - v1) * -1.0;
        let normal_axis = (0..3)
            .find(|&a| outward.to_array()[a] != 0.0)
            .unwrap();
        let sign = outward.to_array()[normal_axis].signum();
        let corners = [v1, v2, v3, v4].map(|v| v.to_array());
        let lo = |a: usize| corners.iter().map(|c| c[a]).fold(f32::MAX, f32::min) as i32;
        let hi = |a: usize| corners.iter().map(|c| c[a]).fold(f32::MIN, f32::max) as i32;
        let plane = corners[0][normal_axis] as i32;
        let (behind, front) = if sign > 0.0 { (plane - 1, plane) } else { (plane, plane - 1) };
        let in_plane: Vec<usize> = (0..3).filter(|&a| a != normal_axis).collect();
        let (u, v) = (in_plane[0], in_plane[1]);
        let owner = owner_of(&mesh, q);
        let mut owner_behind = false;
        for cu in lo(u)..hi(u) {
            for cv in lo(v)..hi(v) {
                let at = |n: i32| {
                    let mut p = [0i32; 3];
                    p[normal_axis] = n;
                    p[u] = cu;
                    p[v] = cv;
                    id_at(chunk, p[0], p[1], p[2])
                };
                let (b, f) = (at(behind), at(front));
                prop_assert_ne!(b, 0);
                prop_assert_ne!(f, b);
                owner_behind |= b == owner;
            }
        }
        prop_assert!(owner_behind);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn random_chunks_cover_exposed_faces(chunk in sparse_chunk()) {
        check_mesh(&chunk)?;
    }

    #[test]
    fn stacked_boxes_cover_exposed_faces(chunk in boxes_chunk()) {
        check_mesh(&chunk)?;
    }

    // A flat slab of any footprint collapses to one quad per side.
    #[test]
    fn slab_is_six_quads(w in 1usize..=CHUNK_SIZE, d in 1usize..=CHUNK_SIZE, z in 0usize..CHUNK_SIZE) {
        let reg = registry();
        let mut chunk = ChunkBuf::filled(ChunkCoord::default(), 0);
        chunk.fill_box((0, 0, z), (w - 1, d - 1, z), 1);
        let mesh = ChunkMesher::new(&reg).with_scale(1.0).build(&chunk).unwrap();
        prop_assert_eq!(mesh.quad_count(), 6);
        let top: Vec<_> = (0..6)
            .map(|q| mesh.quad(q))
            .filter(|c| c.iter().all(|v| v.z == (z + 1) as f32))
            .collect();
        prop_assert_eq!(top.len(), 1);
        let [v1, v2, _, v4] = top[0];
        prop_assert_eq!((v2 - v1).cross(v4 - v1).length(), (w * d) as f32);
    }

    #[test]
    fn meshing_is_deterministic(chunk in sparse_chunk()) {
        let reg = registry();
        let mesher = ChunkMesher::new(&reg);
        prop_assert_eq!(mesher.build(&chunk).unwrap(), mesher.build(&chunk).unwrap());
    }

    #[test]
    fn single_cell_anywhere_is_a_unit_cube(x in 0..CHUNK_SIZE, y in 0..CHUNK_SIZE, z in 0..CHUNK_SIZE) {
        let reg = registry();
        let mut chunk = ChunkBuf::filled(ChunkCoord::default(), 0);
        chunk.set_local(x, y, z, 2);
        let mesh = ChunkMesher::new(&reg).with_scale(1.0).build(&chunk).unwrap();
        prop_assert_eq!(mesh.quad_count(), 6);
        prop_assert_eq!(exposed_faces(&chunk), 6);
        prop_assert_eq!(chunk.blocks[flat_index(x, y, z)], 2);
    }
}
