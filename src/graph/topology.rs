//! 拓扑图
//!
//! 有向图：节点带 switch/server 标签，链路带 capacity/used 属性。
//! 真值图与每个控制器的私有副本都是这个类型，彼此独立可变。

use std::collections::HashMap;

use super::id::{EdgeId, NodeId};
use super::link::{EdgeAttrs, Link, LinkSnapshot};
use super::node::{Node, NodeKind};
use crate::error::{Error, Result};
use tracing::trace;

/// 网络拓扑
#[derive(Debug, Clone, Default)]
pub struct Topology {
    nodes: Vec<Node>,
    links: Vec<Link>,
    by_name: HashMap<String, NodeId>,
    edges: HashMap<(NodeId, NodeId), EdgeId>,
    out_adj: Vec<Vec<EdgeId>>,
    in_adj: Vec<Vec<EdgeId>>,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加交换机节点
    pub fn add_switch(&mut self, name: impl Into<String>) -> Result<NodeId> {
        self.add_node(Node::new(name, NodeKind::Switch))
    }

    /// 添加服务器节点
    pub fn add_server(&mut self, name: impl Into<String>) -> Result<NodeId> {
        self.add_node(Node::new(name, NodeKind::Server))
    }

    fn add_node(&mut self, node: Node) -> Result<NodeId> {
        if self.by_name.contains_key(&node.name) {
            return Err(Error::DuplicateNode { name: node.name });
        }
        let id = NodeId(self.nodes.len());
        self.by_name.insert(node.name.clone(), id);
        self.nodes.push(node);
        self.out_adj.push(Vec::new());
        self.in_adj.push(Vec::new());
        Ok(id)
    }

    /// 连接两个节点（创建单向链路）
    pub fn connect(&mut self, from: NodeId, to: NodeId, capacity: f64) -> Result<EdgeId> {
        if !(capacity.is_finite() && capacity > 0.0) {
            return Err(Error::InvalidCapacity {
                from: self.name(from).to_string(),
                to: self.name(to).to_string(),
                capacity,
            });
        }
        if self.edges.contains_key(&(from, to)) {
            return Err(Error::DuplicateLink {
                from: self.name(from).to_string(),
                to: self.name(to).to_string(),
            });
        }
        let id = EdgeId(self.links.len());
        self.links.push(Link::new(from, to, capacity));
        self.edges.insert((from, to), id);
        self.out_adj[from.0].push(id);
        self.in_adj[to.0].push(id);
        trace!(from = ?from, to = ?to, capacity, edge = ?id, "添加链路");
        Ok(id)
    }

    /// 按名称连接两个节点
    pub fn connect_named(&mut self, from: &str, to: &str, capacity: f64) -> Result<EdgeId> {
        let from = self.require(from)?;
        let to = self.require(to)?;
        self.connect(from, to, capacity)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.links.len()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn name(&self, id: NodeId) -> &str {
        &self.nodes[id.0].name
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.nodes[id.0].kind
    }

    pub fn id(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    /// 按名称查找节点，不存在时报错
    pub fn require(&self, name: &str) -> Result<NodeId> {
        self.id(name).ok_or_else(|| Error::UnknownNode {
            name: name.to_string(),
        })
    }

    /// 按名称查找节点并校验其类型
    pub fn require_kind(&self, name: &str, expected: NodeKind) -> Result<NodeId> {
        let id = self.require(name)?;
        if self.kind(id) != expected {
            return Err(Error::WrongKind {
                name: name.to_string(),
                expected,
            });
        }
        Ok(id)
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// 所有链路 id（拓扑顺序）
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        (0..self.links.len()).map(EdgeId)
    }

    pub fn link_by_id(&self, id: EdgeId) -> &Link {
        &self.links[id.0]
    }

    pub fn endpoints(&self, id: EdgeId) -> (NodeId, NodeId) {
        let link = &self.links[id.0];
        (link.from, link.to)
    }

    pub fn attrs(&self, id: EdgeId) -> &EdgeAttrs {
        &self.links[id.0].attrs
    }

    pub fn attrs_mut(&mut self, id: EdgeId) -> &mut EdgeAttrs {
        &mut self.links[id.0].attrs
    }

    pub fn used(&self, id: EdgeId) -> f64 {
        self.links[id.0].attrs.used
    }

    pub fn set_used(&mut self, id: EdgeId, used: f64) {
        self.links[id.0].attrs.used = used;
    }

    pub fn utilization(&self, id: EdgeId) -> f64 {
        self.links[id.0].attrs.utilization()
    }

    pub fn edge_between(&self, from: NodeId, to: NodeId) -> Option<EdgeId> {
        self.edges.get(&(from, to)).copied()
    }

    /// 按名称查找链路 id
    pub fn edge_named(&self, from: &str, to: &str) -> Option<EdgeId> {
        self.edge_between(self.id(from)?, self.id(to)?)
    }

    /// 按名称读取链路属性
    pub fn link(&self, from: &str, to: &str) -> Option<&EdgeAttrs> {
        self.edge_named(from, to).map(|e| self.attrs(e))
    }

    /// 按名称修改链路属性
    pub fn link_mut(&mut self, from: &str, to: &str) -> Option<&mut EdgeAttrs> {
        let e = self.edge_named(from, to)?;
        Some(self.attrs_mut(e))
    }

    /// 出边（插入顺序）
    pub fn out_edges(&self, id: NodeId) -> &[EdgeId] {
        &self.out_adj[id.0]
    }

    /// 入边（插入顺序）
    pub fn in_edges(&self, id: NodeId) -> &[EdgeId] {
        &self.in_adj[id.0]
    }

    /// 节点名称、类型以及链路端点与顺序完全一致
    pub fn same_shape(&self, other: &Topology) -> bool {
        self.nodes == other.nodes
            && self.links.len() == other.links.len()
            && self
                .links
                .iter()
                .zip(other.links.iter())
                .all(|(a, b)| a.from == b.from && a.to == b.to)
    }

    /// 只读快照（拓扑顺序）
    pub fn snapshot(&self) -> Vec<LinkSnapshot> {
        self.links
            .iter()
            .map(|link| LinkSnapshot {
                from: self.name(link.from).to_string(),
                to: self.name(link.to).to_string(),
                capacity: link.attrs.capacity,
                used: link.attrs.used,
            })
            .collect()
    }
}
