use anyhow::{format_err, Error};
use serde::{Serialize, Serializer};
use std::{
    fmt::{self, Display},
    str::FromStr,
};

/// A category of nameable cloud resource. Each kind has its own naming rule.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    ManagementGroup,
    Subscription,
    ResourceGroup,
    WindowsVm,
    LinuxVm,
    StorageAccount,
    VirtualNetwork,
    Subnet,
    NetworkInterface,
    NetworkSecurityGroup,
    PublicIpAddress,
}

impl ResourceKind {
    /// Every kind, in declaration order.
    pub const ALL: [ResourceKind; 11] = [
        Self::ManagementGroup,
        Self::Subscription,
        Self::ResourceGroup,
        Self::WindowsVm,
        Self::LinuxVm,
        Self::StorageAccount,
        Self::VirtualNetwork,
        Self::Subnet,
        Self::NetworkInterface,
        Self::NetworkSecurityGroup,
        Self::PublicIpAddress,
    ];

    /// The canonical short code that a `{NameCode}` template token must match exactly.
    pub fn code(self) -> &'static str {
        match self {
            Self::ManagementGroup => "mg",
            Self::Subscription => "sub",
            Self::ResourceGroup => "rg",
            Self::WindowsVm | Self::LinuxVm => "vm",
            Self::StorageAccount => "st",
            Self::VirtualNetwork => "vnet",
            Self::Subnet => "snet",
            Self::NetworkInterface => "nic",
            Self::NetworkSecurityGroup => "nsg",
            Self::PublicIpAddress => "pip",
        }
    }

    /// The name used for this kind in rule-set documents.
    pub fn name(self) -> &'static str {
        match self {
            Self::ManagementGroup => "ManagementGroup",
            Self::Subscription => "Subscription",
            Self::ResourceGroup => "ResourceGroup",
            Self::WindowsVm => "WindowsVM",
            Self::LinuxVm => "LinuxVM",
            Self::StorageAccount => "StorageAccount",
            Self::VirtualNetwork => "VirtualNetwork",
            Self::Subnet => "Subnet",
            Self::NetworkInterface => "NetworkInterface",
            Self::NetworkSecurityGroup => "NetworkSecurityGroup",
            Self::PublicIpAddress => "PublicIPAddress",
        }
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Case-insensitive; `-` and `_` are ignored so `storage-account` resolves too.
impl FromStr for ResourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s
            .chars()
            .filter(|ch| *ch != '-' && *ch != '_')
            .collect::<String>();

        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| format_err!("unrecognized resource kind '{s}'"))
    }
}

impl Serialize for ResourceKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
