use std::{
    collections::{BTreeMap, BTreeSet},
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use geo::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{
    connection::Connection,
    layer::Layer,
    placement::Placement,
    plane::Plane,
};

impl_uuid_index!(NetId);
impl_uuid_index!(JunctionId);
impl_uuid_index!(PackageId);
impl_uuid_index!(PadId);
impl_uuid_index!(TrackId);
impl_uuid_index!(PlaneId);

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoardError {
    #[error("net {0} does not exist")]
    NoSuchNet(NetId),
    #[error("junction {0} does not exist")]
    NoSuchJunction(JunctionId),
    #[error("package {0} does not exist")]
    NoSuchPackage(PackageId),
    #[error("pad {1} does not exist in package {0}")]
    NoSuchPad(PackageId, PadId),
    #[error("net name {0:?} is used more than once")]
    DuplicateNetName(String),
}

#[derive(Error, Debug)]
pub enum LoadingError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Board(#[from] BoardError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Net {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Junction {
    pub position: Point,
    pub layer: Layer,
    #[serde(default)]
    pub has_via: bool,
    pub net: Option<NetId>,
}

impl Junction {
    /// Layer the junction connects on. A junction under a via reaches every layer.
    pub fn layer(&self) -> Layer {
        if self.has_via {
            Layer::Through
        } else {
            self.layer
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PadstackKind {
    Top,
    Bottom,
    Through,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pad {
    pub name: String,
    /// Relative to the package.
    pub placement: Placement,
    pub padstack: PadstackKind,
    pub net: Option<NetId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub refdes: String,
    pub placement: Placement,
    /// Mounted on the bottom side.
    #[serde(default)]
    pub flip: bool,
    #[serde(default)]
    pub pads: BTreeMap<PadId, Pad>,
}

impl Package {
    pub fn effective_placement(&self) -> Placement {
        if self.flip {
            self.placement.flipped()
        } else {
            self.placement
        }
    }

    pub fn pad_position(&self, pad: &Pad) -> Point {
        self.effective_placement().transform(pad.placement.shift)
    }

    pub fn pad_layer(&self, pad: &Pad) -> Layer {
        let layer = match pad.padstack {
            PadstackKind::Top => Layer::TOP,
            PadstackKind::Bottom => Layer::BOTTOM,
            PadstackKind::Through => Layer::Through,
        };

        if self.flip {
            layer.flipped()
        } else {
            layer
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub net: Option<NetId>,
    pub layer: Layer,
    pub from: Connection,
    pub to: Connection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Board {
    #[serde(default)]
    nets: BTreeMap<NetId, Net>,
    #[serde(default)]
    junctions: BTreeMap<JunctionId, Junction>,
    #[serde(default)]
    packages: BTreeMap<PackageId, Package>,
    #[serde(default)]
    tracks: BTreeMap<TrackId, Track>,
    #[serde(default)]
    planes: BTreeMap<PlaneId, Plane>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a JSON snapshot and checks that everything it references exists.
    pub fn load(reader: impl Read) -> Result<Self, LoadingError> {
        let board: Self = serde_json::from_reader(reader)?;
        board.validate()?;
        Ok(board)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, LoadingError> {
        let file = File::open(path)?;
        Self::load(BufReader::new(file))
    }

    pub fn validate(&self) -> Result<(), BoardError> {
        let mut netnames = BTreeSet::new();
        for net in self.nets.values() {
            if !netnames.insert(net.name.as_str()) {
                return Err(BoardError::DuplicateNetName(net.name.clone()));
            }
        }

        for junction in self.junctions.values() {
            self.check_maybe_net(junction.net)?;
        }

        for package in self.packages.values() {
            for pad in package.pads.values() {
                self.check_maybe_net(pad.net)?;
            }
        }

        for track in self.tracks.values() {
            self.check_track(track)?;
        }

        for plane in self.planes.values() {
            self.check_net(plane.net)?;
        }

        Ok(())
    }

    pub fn add_net(&mut self, name: impl Into<String>) -> Result<NetId, BoardError> {
        let name = name.into();

        if self.netname_net(&name).is_some() {
            return Err(BoardError::DuplicateNetName(name));
        }

        let net = NetId::random();
        self.nets.insert(net, Net { name });
        Ok(net)
    }

    pub fn add_junction(&mut self, junction: Junction) -> Result<JunctionId, BoardError> {
        self.check_maybe_net(junction.net)?;
        let index = JunctionId::random();
        self.junctions.insert(index, junction);
        Ok(index)
    }

    /// Adds a package, giving each pad a fresh id. Returns the package id and the pad ids in
    /// the order the pads were given.
    pub fn add_package(
        &mut self,
        refdes: impl Into<String>,
        placement: Placement,
        flip: bool,
        pads: impl IntoIterator<Item = Pad>,
    ) -> Result<(PackageId, Vec<PadId>), BoardError> {
        let mut pad_map = BTreeMap::new();
        let mut pad_ids = Vec::new();

        for pad in pads {
            self.check_maybe_net(pad.net)?;
            let pad_id = PadId::random();
            pad_map.insert(pad_id, pad);
            pad_ids.push(pad_id);
        }

        let package = PackageId::random();
        self.packages.insert(
            package,
            Package {
                refdes: refdes.into(),
                placement,
                flip,
                pads: pad_map,
            },
        );

        Ok((package, pad_ids))
    }

    pub fn add_track(&mut self, track: Track) -> Result<TrackId, BoardError> {
        self.check_track(&track)?;
        let index = TrackId::random();
        self.tracks.insert(index, track);
        Ok(index)
    }

    pub fn remove_track(&mut self, track: TrackId) -> Option<Track> {
        self.tracks.remove(&track)
    }

    pub fn add_plane(&mut self, plane: Plane) -> Result<PlaneId, BoardError> {
        self.check_net(plane.net)?;
        let index = PlaneId::random();
        self.planes.insert(index, plane);
        Ok(index)
    }

    fn check_net(&self, net: NetId) -> Result<(), BoardError> {
        if self.nets.contains_key(&net) {
            Ok(())
        } else {
            Err(BoardError::NoSuchNet(net))
        }
    }

    fn check_maybe_net(&self, maybe_net: Option<NetId>) -> Result<(), BoardError> {
        maybe_net.map_or(Ok(()), |net| self.check_net(net))
    }

    fn check_track(&self, track: &Track) -> Result<(), BoardError> {
        self.check_maybe_net(track.net)?;
        self.check_connection(&track.from)?;
        self.check_connection(&track.to)
    }

    fn check_connection(&self, connection: &Connection) -> Result<(), BoardError> {
        match connection {
            Connection::Junction(junction_ref) => {
                if !self.junctions.contains_key(&junction_ref.junction) {
                    return Err(BoardError::NoSuchJunction(junction_ref.junction));
                }
            }
            Connection::Pad(pad_ref) => {
                let package = self
                    .packages
                    .get(&pad_ref.package)
                    .ok_or(BoardError::NoSuchPackage(pad_ref.package))?;

                if !package.pads.contains_key(&pad_ref.pad) {
                    return Err(BoardError::NoSuchPad(pad_ref.package, pad_ref.pad));
                }
            }
        }

        Ok(())
    }

    pub fn netname_net(&self, netname: &str) -> Option<NetId> {
        self.nets
            .iter()
            .find_map(|(net, weight)| (weight.name == netname).then_some(*net))
    }

    pub fn junction(&self, junction: JunctionId) -> Option<&Junction> {
        self.junctions.get(&junction)
    }

    pub fn package(&self, package: PackageId) -> Option<&Package> {
        self.packages.get(&package)
    }

    pub fn net_junctions(&self, net: NetId) -> impl Iterator<Item = JunctionId> + '_ {
        self.junctions
            .iter()
            .filter(move |(_, junction)| junction.net == Some(net))
            .map(|(index, _)| *index)
    }

    pub fn net_pads(&self, net: NetId) -> impl Iterator<Item = (PackageId, PadId)> + '_ {
        self.packages.iter().flat_map(move |(package_id, package)| {
            package
                .pads
                .iter()
                .filter(move |(_, pad)| pad.net == Some(net))
                .map(move |(pad_id, _)| (*package_id, *pad_id))
        })
    }

    pub fn net_tracks(&self, net: NetId) -> impl Iterator<Item = &Track> + '_ {
        self.tracks
            .values()
            .filter(move |track| track.net == Some(net))
    }

    pub fn net_planes(&self, net: NetId) -> impl Iterator<Item = &Plane> + '_ {
        self.planes.values().filter(move |plane| plane.net == net)
    }

    /// Nets owning at least one junction or pad, the only ones that can need airwires.
    pub fn nets_with_points(&self) -> BTreeSet<NetId> {
        self.junctions
            .values()
            .filter_map(|junction| junction.net)
            .chain(
                self.packages
                    .values()
                    .flat_map(|package| package.pads.values().filter_map(|pad| pad.net)),
            )
            .collect()
    }
}
