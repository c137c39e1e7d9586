//! Two free-floating magnets snapping together.
//!
//! Drives the magnet pair model with a toy host engine that integrates the
//! applied forces with semi-implicit Euler and prints the closing gap.

use magsim::{BodyId, HostEngine, MagnetPairModel, PairConfig, Pose, Vec3};

struct FreeBody {
    name: String,
    pose: Pose,
    velocity: Vec3,
    mass: f64,
    force: Vec3,
}

struct ToyEngine {
    bodies: Vec<FreeBody>,
    time: f64,
}

impl ToyEngine {
    fn integrate(&mut self, dt: f64) {
        for body in &mut self.bodies {
            let accel = body.force / body.mass;
            body.velocity += accel * dt;
            body.pose.pos += body.velocity * dt;
            body.force = Vec3::zeros();
        }
        self.time += dt;
    }
}

impl HostEngine for ToyEngine {
    fn find_body(&self, name: &str) -> Option<BodyId> {
        self.bodies
            .iter()
            .position(|b| b.name == name)
            .map(|i| BodyId(i as u64))
    }

    fn body_pose(&self, body: BodyId) -> Pose {
        self.bodies[body.0 as usize].pose
    }

    fn apply_force(&mut self, body: BodyId, force: Vec3) {
        self.bodies[body.0 as usize].force += force;
    }

    fn apply_torque(&mut self, _body: BodyId, _torque: Vec3) {
        // Point masses in this demo; torques are dropped.
    }

    fn sim_time(&self) -> f64 {
        self.time
    }
}

fn main() {
    let config = PairConfig::from_xml_str(
        "<plugin>\
            <parentBodyName>left</parentBodyName>\
            <childBodyName>right</childBodyName>\
            <parentDipoleMoment>10 0 0</parentDipoleMoment>\
            <childDipoleMoment>10 0 0</childDipoleMoment>\
         </plugin>",
    )
    .expect("valid parameter block");

    let mut engine = ToyEngine {
        bodies: vec![
            FreeBody {
                name: "left".to_string(),
                pose: Pose::from_translation(Vec3::new(0.1, 0.0, 0.0)),
                velocity: Vec3::zeros(),
                mass: 0.05,
                force: Vec3::zeros(),
            },
            FreeBody {
                name: "right".to_string(),
                pose: Pose::identity(),
                velocity: Vec3::zeros(),
                mass: 0.05,
                force: Vec3::zeros(),
            },
        ],
        time: 0.0,
    };

    let mut model = MagnetPairModel::load(&engine, &config).expect("bodies resolve");

    let dt = 1e-4;
    println!("time (s)   gap (mm)   force_x (N)");
    for step in 0..20_000 {
        let out = match model.step(&mut engine) {
            Ok(Some(out)) => out,
            Ok(None) => break,
            Err(err) => {
                // The magnets have closed the gap completely.
                println!("stopped: {err}");
                break;
            }
        };
        engine.integrate(dt);

        let gap = (engine.bodies[0].pose.pos - engine.bodies[1].pose.pos).norm();
        if step % 2000 == 0 {
            println!("{:8.4}   {:8.3}   {:+.3e}", engine.time, gap * 1e3, out.force.x);
        }
        if gap < 1e-3 {
            println!("{:8.4}   magnets in contact", engine.time);
            break;
        }
    }
}
