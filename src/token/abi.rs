//! Contract binding for the deployed token.
//!
//! Standard ERC20 plus Burnable, Pausable, Ownable, ERC1363, ERC20Permit and
//! ERC20FlashMint (ERC3156) entry points.

use alloy::sol;

sol! {
    #[sol(rpc)]
    interface IEduMeta {
        event Transfer(address indexed from, address indexed to, uint256 value);
        event Approval(address indexed owner, address indexed spender, uint256 value);

        function name() external view returns (string);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
        function totalSupply() external view returns (uint256);
        function balanceOf(address account) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);

        function transfer(address to, uint256 value) external returns (bool);
        function transferFrom(address from, address to, uint256 value) external returns (bool);
        function approve(address spender, uint256 value) external returns (bool);

        function owner() external view returns (address);
        function mint(address to, uint256 amount) external;
        function burn(uint256 value) external;

        function paused() external view returns (bool);
        function pause() external;
        function unpause() external;

        function nonces(address owner) external view returns (uint256);
        function DOMAIN_SEPARATOR() external view returns (bytes32);
        function permit(address owner, address spender, uint256 value, uint256 deadline, uint8 v, bytes32 r, bytes32 s) external;

        function transferAndCall(address to, uint256 value, bytes data) external returns (bool);
        function approveAndCall(address spender, uint256 value, bytes data) external returns (bool);

        function maxFlashLoan(address token) external view returns (uint256);
        function flashLoan(address receiver, address token, uint256 value, bytes data) external returns (bool);
    }
}
