//! Swarm stress demo
//!
//! Drives the loose octree the way a game frame would: a few hundred boxes
//! drift through the world, each frame re-inserts the ones that moved, and
//! broad-phase queries run against the result. Statistics go to the log.

use loose_octree::prelude::*;
use rand::Rng;

const BOX_COUNT: usize = 300;
const FRAMES: usize = 600;
const WORLD_HALF: f32 = 90.0;

struct SwarmBox {
    id: usize,
    position: Vec3,
    velocity: Vec3,
    half_extent: f32,
}

impl SwarmBox {
    fn bounds(&self) -> Aabb {
        Aabb::from_center_extents(self.position, Vec3::from_element(self.half_extent))
    }
}

fn main() {
    env_logger::init();

    let config = OctreeConfig {
        initial_size: 200.0,
        min_node_size: 2.0,
        looseness: 1.2,
    };
    let mut tree: LooseOctree<usize> = LooseOctree::new(config, Vec3::zeros());

    let mut rng = rand::thread_rng();
    let mut boxes: Vec<SwarmBox> = Vec::with_capacity(BOX_COUNT);
    for id in 0..BOX_COUNT {
        let swarm_box = SwarmBox {
            id,
            position: Vec3::new(
                rng.gen_range(-WORLD_HALF..WORLD_HALF),
                rng.gen_range(-WORLD_HALF..WORLD_HALF),
                rng.gen_range(-WORLD_HALF..WORLD_HALF),
            ),
            velocity: Vec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            ),
            half_extent: rng.gen_range(0.5..3.0),
        };
        match tree.add(id, swarm_box.bounds()) {
            Ok(()) => boxes.push(swarm_box),
            Err(err) => log::error!("failed to insert box {id}: {err}"),
        }
    }
    log::info!("seeded {} boxes", tree.count());

    for frame in 0..FRAMES {
        for swarm_box in &mut boxes {
            if !tree.remove_with_bounds(&swarm_box.id, swarm_box.bounds()) {
                log::warn!("box {} was not where its bounds said", swarm_box.id);
                continue;
            }
            swarm_box.position += swarm_box.velocity;
            // Bounce off the walls of the seeded region.
            for axis in 0..3 {
                if swarm_box.position[axis].abs() > WORLD_HALF {
                    swarm_box.velocity[axis] = -swarm_box.velocity[axis];
                    swarm_box.position[axis] = swarm_box.position[axis].clamp(-WORLD_HALF, WORLD_HALF);
                }
            }
            if let Err(err) = tree.add(swarm_box.id, swarm_box.bounds()) {
                log::error!("failed to re-insert box {}: {err}", swarm_box.id);
            }
        }

        if frame % 60 == 0 {
            let probe = Aabb::from_center_extents(Vec3::zeros(), Vec3::from_element(25.0));
            let near_origin = tree.get_colliding(&probe).len();
            let ray = Ray::new(Vec3::new(-250.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
            let on_ray = tree.get_colliding_ray(&ray, f32::INFINITY).len();
            log::info!(
                "frame {frame}: {} stored, {near_origin} near origin, {on_ray} on +X ray",
                tree.count()
            );
        }
    }

    log::info!("done; final count {}", tree.count());
}
